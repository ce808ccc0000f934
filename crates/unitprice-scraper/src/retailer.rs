//! Retailer classification by hostname.

/// Which extraction strategy a product page should go through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RetailerCategory {
    Amazon,
    Walmart,
    Generic,
}

/// Hostname fragments checked in order; the first contained fragment wins.
const HOST_FRAGMENTS: &[(&str, RetailerCategory)] = &[
    ("amazon", RetailerCategory::Amazon),
    ("walmart", RetailerCategory::Walmart),
];

impl std::fmt::Display for RetailerCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RetailerCategory::Amazon => write!(f, "amazon"),
            RetailerCategory::Walmart => write!(f, "walmart"),
            RetailerCategory::Generic => write!(f, "generic"),
        }
    }
}

/// Classifies `url` by its lowercased hostname. Unparsable URLs and unknown
/// hosts are [`RetailerCategory::Generic`].
#[must_use]
pub fn classify(url: &str) -> RetailerCategory {
    let Some(host) = reqwest::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_ascii_lowercase))
    else {
        return RetailerCategory::Generic;
    };

    HOST_FRAGMENTS
        .iter()
        .find(|(fragment, _)| host.contains(fragment))
        .map_or(RetailerCategory::Generic, |(_, category)| *category)
}
