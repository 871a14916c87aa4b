use std::{ops::Deref, sync::LazyLock};

use meridian_utils::meridian_version;

pub static USER_AGENT: LazyLock<String> = LazyLock::new(|| {
    let homepage = env!("CARGO_PKG_HOMEPAGE");
    let version = meridian_version();

    format!("Meridian Contact Client ({homepage}, Version {version})")
});

const _: () = assert!(!env!("CARGO_PKG_HOMEPAGE").is_empty());

#[derive(Debug, Clone)]
pub struct HttpClient(reqwest::Client);

impl HttpClient {
    pub fn new() -> reqwest::Result<Self> {
        reqwest::Client::builder()
            .user_agent(&*USER_AGENT)
            .build()
            .map(Self)
    }
}

impl Deref for HttpClient {
    type Target = reqwest::Client;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
