use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

use crate::domain::models::product::Product;

// 可选 "+"，一位起始数字，之后至少 7 位数字/连字符/空格
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?\d[\d\-\s]{7,}$").unwrap());

pub fn validate_phone(phone: &str) -> Result<(), String> {
    if PHONE_RE.is_match(phone) {
        Ok(())
    } else {
        Err("Invalid phone format. Use +1234567890 or 123-456-7890.".to_string())
    }
}

pub fn validate_price(price: Decimal) -> Result<(), String> {
    if price <= Decimal::ZERO {
        Err("Price must be positive.".to_string())
    } else {
        Ok(())
    }
}

pub fn validate_stock(stock: i32) -> Result<(), String> {
    if stock < 0 {
        Err("Stock cannot be negative.".to_string())
    } else {
        Ok(())
    }
}

/// 订单总额：对已解析出的商品求精确小数和，结果是创建时刻的快照
pub fn order_total(products: &[Product]) -> Decimal {
    products
        .iter()
        .fold(Decimal::ZERO, |total, product| total + product.price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::prelude::FromPrimitive;
    use rust_decimal_macros::dec;

    #[test]
    fn test_phone_accepts_common_formats() {
        assert!(validate_phone("+1234567890").is_ok());
        assert!(validate_phone("123-456-7890").is_ok());
        assert!(validate_phone("123 456 7890").is_ok());
        assert!(validate_phone("12345678").is_ok());
    }

    #[test]
    fn test_phone_minimum_length_boundary() {
        // 可选 "+" 之后恰好 8 个字符是下限
        assert!(validate_phone("12345678").is_ok());
        assert!(validate_phone("+12345678").is_ok());
        assert!(validate_phone("1234567").is_err());
        assert!(validate_phone("+1234567").is_err());
    }

    #[test]
    fn test_phone_rejects_bad_shapes() {
        assert!(validate_phone("").is_err());
        assert!(validate_phone("abcdefgh").is_err());
        assert!(validate_phone("+abc12345").is_err());
        assert!(validate_phone("-12345678").is_err());
        assert!(validate_phone("12345678x").is_err());
    }

    #[test]
    fn test_price_bounds() {
        assert!(validate_price(dec!(0)).is_err());
        assert!(validate_price(dec!(-0.01)).is_err());
        assert!(validate_price(dec!(0.01)).is_ok());
        assert!(validate_price(dec!(9.99)).is_ok());
    }

    #[test]
    fn test_stock_bounds() {
        assert!(validate_stock(-1).is_err());
        assert!(validate_stock(0).is_ok());
        assert!(validate_stock(5).is_ok());
    }

    #[test]
    fn test_order_total_is_exact() {
        let products = vec![
            Product::new("Widget", dec!(9.99), 5),
            Product::new("Gadget", dec!(0.01), 1),
        ];
        assert_eq!(order_total(&products), dec!(10.00));
    }

    #[test]
    fn test_order_total_survives_float_input() {
        // f64 传入的价格在转成 Decimal 后求和仍是精确值
        let price = Decimal::from_f64(9.99).unwrap();
        let products = vec![Product::new("Widget", price, 5)];
        assert_eq!(order_total(&products), dec!(9.99));
    }

    #[test]
    fn test_order_total_empty_is_zero() {
        assert_eq!(order_total(&[]), Decimal::ZERO);
    }
}
