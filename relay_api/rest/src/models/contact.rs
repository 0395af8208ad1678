use relay_models::contact::{ContactForm, MissingFields};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A contact form as posted by a browser. Unknown fields are ignored.
/// Numbers are accepted for every field, e.g. from `<input type="number">`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiContactForm {
    #[serde(deserialize_with = "text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "text")]
    pub email: Option<String>,
    #[serde(deserialize_with = "text")]
    pub message: Option<String>,
    #[serde(deserialize_with = "text")]
    pub phone: Option<String>,
    #[serde(deserialize_with = "text")]
    pub location: Option<String>,
    #[serde(deserialize_with = "text")]
    pub service: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Text {
    String(String),
    Integer(i64),
    Float(f64),
}

fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<Text>::deserialize(deserializer)?.map(|text| match text {
        Text::String(value) => value,
        Text::Integer(value) => value.to_string(),
        Text::Float(value) => value.to_string(),
    }))
}

impl From<ApiContactForm> for ContactForm {
    fn from(value: ApiContactForm) -> Self {
        Self {
            name: value.name,
            email: value.email,
            message: value.message,
            phone: value.phone,
            location: value.location,
            service: value.service,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiMissingFieldsError {
    pub success: bool,
    pub error: &'static str,
    pub missing: ApiMissingFields,
}

/// Serialized as `{"<field>": <missing>}` for every required field, in the
/// order the schema lists them.
#[derive(Debug)]
pub struct ApiMissingFields(pub MissingFields);

impl Serialize for ApiMissingFields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(
            self.0
                .schema
                .required_fields()
                .iter()
                .map(|&field| (field.as_str(), self.0.is_missing(field))),
        )
    }
}
