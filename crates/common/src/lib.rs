pub mod types;
pub mod utils;
pub mod env;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_up() {
        let h = types::Health::up();
        assert_eq!(h.status, "UP");
        let json = serde_json::to_value(&h).unwrap();
        assert_eq!(json, serde_json::json!({"status": "UP"}));
    }

    #[test]
    fn info_serializes_message() {
        let json = serde_json::to_value(types::Info { message: "hi" }).unwrap();
        assert_eq!(json["message"], "hi");
    }
}
