//! Utility functions and helpers

/// Format a string of digits with thousands separators
pub fn format_number<T: ToString>(n: T) -> String {
    let s = n.to_string();
    let mut result = String::new();
    let mut count = 0;
    for c in s.chars().rev() {
        if count == 3 {
            result.push(',');
            count = 0;
        }
        result.push(c);
        count += 1;
    }
    result.chars().rev().collect()
}

/// Format an amount with fixed decimals and grouped thousands: `-1,234.50`
pub fn format_amount(amount: f64, decimal_places: u32) -> String {
    let fixed = format!("{:.*}", decimal_places as usize, amount.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (fixed.as_str(), None),
    };

    // Amounts that round to zero print without a sign
    let rounds_to_zero = fixed.bytes().all(|b| b == b'0' || b == b'.');
    let sign = if amount < 0.0 && !rounds_to_zero { "-" } else { "" };
    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, format_number(int_part), frac),
        None => format!("{}{}", sign, format_number(int_part)),
    }
}

/// Step attribute for a number input with the given precision
pub fn amount_step(decimal_places: u32) -> String {
    if decimal_places == 0 {
        "1".to_string()
    } else {
        format!("0.{}1", "0".repeat(decimal_places as usize - 1))
    }
}

/// Escape text for use in HTML element content and quoted attributes
pub fn escape_html(content: &str) -> String {
    let mut escaped = String::with_capacity(content.len());
    for c in content.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(4.5, 2), "4.50");
        assert_eq!(format_amount(1234.5, 2), "1,234.50");
        assert_eq!(format_amount(-1234567.891, 2), "-1,234,567.89");
        assert_eq!(format_amount(1500.0, 0), "1,500");
    }

    #[test]
    fn test_format_amount_negative_rounding_to_zero() {
        assert_eq!(format_amount(-0.001, 2), "0.00");
        assert_eq!(format_amount(-0.4, 0), "0");
        assert_eq!(format_amount(-0.006, 2), "-0.01");
        assert_eq!(format_amount(-0.0, 2), "0.00");
    }

    #[test]
    fn test_amount_step() {
        assert_eq!(amount_step(0), "1");
        assert_eq!(amount_step(1), "0.1");
        assert_eq!(amount_step(2), "0.01");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("Coffee"), "Coffee");
        assert_eq!(
            escape_html(r#"<script>alert("x")</script> & 'y'"#),
            "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt; &amp; &#39;y&#39;"
        );
    }
}
