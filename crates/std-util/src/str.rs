use heck::{ToLowerCamelCase, ToSnakeCase, ToUpperCamelCase};

pub fn snake_case(src: &str) -> String {
    src.to_snake_case()
}

pub fn camel_case(src: &str) -> String {
    src.to_lower_camel_case()
}

pub fn upper_camel_case(src: &str) -> String {
    src.to_upper_camel_case()
}

/// Pluralizes the last word of a snake_case identifier.
pub fn pluralize(src: &str) -> String {
    match src.rsplit_once('_') {
        Some((head, last)) => format!("{head}_{}", pluralizer::pluralize(last, 2, false)),
        None => pluralizer::pluralize(src, 2, false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pluralize_last_word() {
        assert_eq!(pluralize("user"), "users");
        assert_eq!(pluralize("order_item"), "order_items");
        assert_eq!(pluralize("person"), "people");
    }

    #[test]
    fn snake_case_words() {
        assert_eq!(snake_case("OrderItem"), "order_item");
        assert_eq!(snake_case("ColumnInt"), "column_int");
    }
}
