pub const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Regions,
    Services,
}

impl DocumentKind {
    fn as_str(self) -> &'static str {
        match self {
            Self::Regions => "regions",
            Self::Services => "services",
        }
    }

    pub fn object_key(self) -> String {
        format!("data/{}.json", self.as_str())
    }
}

pub fn regions_object_key() -> String {
    DocumentKind::Regions.object_key()
}

pub fn services_object_key() -> String {
    DocumentKind::Services.object_key()
}
