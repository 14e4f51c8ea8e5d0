//! Well-known setting keys used by the storefront back office.
//!
//! The access layer accepts any key that can name a URL path segment; these
//! constants only keep the admin pages (contact, delivery, documents) and the
//! public storefront in agreement on spelling.

/// Display name of the shop.
pub const STORE_NAME: &str = "storeName";

/// Contact page.
pub const CONTACT_EMAIL: &str = "contactEmail";
pub const CONTACT_PHONE: &str = "contactPhone";
pub const CONTACT_ADDRESS: &str = "contactAddress";

/// Delivery page.
pub const DELIVERY_TERMS: &str = "deliveryTerms";
pub const DELIVERY_FEE: &str = "deliveryFee";
pub const FREE_DELIVERY_THRESHOLD: &str = "freeDeliveryThreshold";

/// Documents page.
pub const TERMS_DOCUMENT_URL: &str = "termsDocumentUrl";
pub const PRIVACY_DOCUMENT_URL: &str = "privacyDocumentUrl";
pub const RETURNS_DOCUMENT_URL: &str = "returnsDocumentUrl";

/// Every key the back office manages explicitly.
pub const KNOWN_KEYS: &[&str] = &[
    STORE_NAME,
    CONTACT_EMAIL,
    CONTACT_PHONE,
    CONTACT_ADDRESS,
    DELIVERY_TERMS,
    DELIVERY_FEE,
    FREE_DELIVERY_THRESHOLD,
    TERMS_DOCUMENT_URL,
    PRIVACY_DOCUMENT_URL,
    RETURNS_DOCUMENT_URL,
];

/// Whether `key` is one of the back office's managed settings.
pub fn is_known(key: &str) -> bool {
    KNOWN_KEYS.contains(&key)
}

/// Whether `key` can address a single setting.
///
/// Empty keys and keys made only of dots are refused: URL path resolution
/// turns `.` and `..` into the collection itself.
pub fn is_addressable(key: &str) -> bool {
    !key.is_empty() && !key.chars().all(|c| c == '.')
}
