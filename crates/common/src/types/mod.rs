use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Single-object body: `{ "success": true, "data": ... }`
#[derive(Serialize, Debug)]
pub struct DataBody<T> {
    pub success: bool,
    pub data: T,
}

impl<T> DataBody<T> {
    pub fn of(data: T) -> Self {
        Self { success: true, data }
    }
}

/// List body: `{ "success": true, "count": N, "data": [...] }`
#[derive(Serialize, Debug)]
pub struct ListBody<T> {
    pub success: bool,
    pub count: usize,
    pub data: Vec<T>,
}

impl<T> ListBody<T> {
    pub fn of(data: Vec<T>) -> Self {
        Self { success: true, count: data.len(), data }
    }
}

/// Message-only body: `{ "success": true, "message": "..." }`
#[derive(Serialize, Deserialize, Debug)]
pub struct MessageBody {
    pub success: bool,
    pub message: String,
}

impl MessageBody {
    pub fn of(message: impl Into<String>) -> Self {
        Self { success: true, message: message.into() }
    }
}
