use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

impl Health {
    pub fn up() -> Self { Self { status: "UP" } }
}

/// Payload of the root endpoint.
#[derive(Serialize, Debug)]
pub struct Info {
    pub message: &'static str,
}
