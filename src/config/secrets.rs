use std::fmt;

pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const IG_ACCESS_TOKEN: &str = "IG_ACCESS_TOKEN";
pub const IG_ACCOUNT_ID: &str = "IG_ACCOUNT_ID";

/// Credentials taken from the environment (or a `.env` file loaded beforehand).
///
/// Missing values are not fatal. They are logged and left empty, and the
/// remote API rejects the request later.
#[derive(Clone, Default)]
pub struct Secrets {
    pub openai_api_key: String,
    pub ig_access_token: String,
    pub ig_account_id: String,
}

impl fmt::Debug for Secrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secrets")
            .field("openai_api_key", &redact(&self.openai_api_key))
            .field("ig_access_token", &redact(&self.ig_access_token))
            .field("ig_account_id", &self.ig_account_id)
            .finish()
    }
}

fn redact(value: &str) -> &'static str {
    if value.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}

impl Secrets {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| match lookup(name).filter(|v| !v.is_empty()) {
            Some(value) => value,
            None => {
                tracing::warn!("{} is not set; requests needing it will be rejected", name);
                String::new()
            }
        };

        Self {
            openai_api_key: read(OPENAI_API_KEY),
            ig_access_token: read(IG_ACCESS_TOKEN),
            ig_account_id: read(IG_ACCOUNT_ID),
        }
    }
}
