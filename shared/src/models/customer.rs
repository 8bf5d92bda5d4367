//! Customer Model
//!
//! A `Customer` here is an open tab with a live cart, not a durable
//! CRM profile: created when the tab opens, deleted the moment its
//! order is paid.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::cart::{CartItem, DiscountType};

/// What the next checkout on this session does: create a fresh order,
/// or overwrite the order the session was restored from.
///
/// Serialized as the nullable `editingOrderId` field (absent/null maps
/// to `NewOrder`) so backup files keep the historical wire shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionMode {
    #[default]
    NewOrder,
    EditingOrder(String),
}

impl SessionMode {
    pub fn editing_order_id(&self) -> Option<&str> {
        match self {
            Self::NewOrder => None,
            Self::EditingOrder(id) => Some(id),
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, Self::EditingOrder(_))
    }
}

impl Serialize for SessionMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::NewOrder => serializer.serialize_none(),
            Self::EditingOrder(id) => serializer.serialize_some(id),
        }
    }
}

impl<'de> Deserialize<'de> for SessionMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<String>::deserialize(deserializer)? {
            Some(id) => Self::EditingOrder(id),
            None => Self::NewOrder,
        })
    }
}

/// Active customer session (open tab)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub visits: u32,
    #[serde(default)]
    pub last_visit: String,
    #[serde(default)]
    pub loyalty_points: u64,
    #[serde(default)]
    pub cart: Vec<CartItem>,
    #[serde(default)]
    pub discount_type: DiscountType,
    #[serde(default)]
    pub discount_value: f64,
    #[serde(rename = "editingOrderId", default)]
    pub mode: SessionMode,
}

/// Contact-detail edits from the sidebar; cart and mode are untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer(mode: SessionMode) -> Customer {
        Customer {
            id: "1".into(),
            name: "Customer 1".into(),
            email: String::new(),
            phone: String::new(),
            visits: 1,
            last_visit: String::new(),
            loyalty_points: 0,
            cart: vec![],
            discount_type: DiscountType::Fixed,
            discount_value: 0.0,
            mode,
        }
    }

    #[test]
    fn session_mode_serializes_as_editing_order_id() {
        let json = serde_json::to_value(customer(SessionMode::NewOrder)).unwrap();
        assert!(json["editingOrderId"].is_null());

        let json =
            serde_json::to_value(customer(SessionMode::EditingOrder("42".into()))).unwrap();
        assert_eq!(json["editingOrderId"], "42");
    }

    #[test]
    fn session_mode_deserializes_from_null_or_absent() {
        let c: Customer = serde_json::from_str(
            r#"{"id":"1","name":"Customer 1","editingOrderId":null}"#,
        )
        .unwrap();
        assert_eq!(c.mode, SessionMode::NewOrder);

        let c: Customer = serde_json::from_str(r#"{"id":"1","name":"Customer 1"}"#).unwrap();
        assert_eq!(c.mode, SessionMode::NewOrder);

        let c: Customer = serde_json::from_str(
            r#"{"id":"1","name":"Customer 1","editingOrderId":"42"}"#,
        )
        .unwrap();
        assert_eq!(c.mode, SessionMode::EditingOrder("42".into()));
    }
}
