/// Table cell for a nullable column; NULL renders as "-".
pub fn cell<T: ToString>(value: &Option<T>) -> String {
    match value {
        Some(value) => value.to_string(),
        None => "-".to_string(),
    }
}
