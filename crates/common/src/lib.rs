pub mod types;
pub mod utils;

#[cfg(test)]
mod tests {
    use crate::types::{Health, ListBody};

    #[test]
    fn health_type_ok() {
        let h = Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn list_body_counts_items() {
        let body = ListBody::of(vec![1, 2, 3]);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["count"], 3);
    }
}
