//! Best-effort device tag for display. Collides easily and changes whenever the
//! host does; participation is never checked against it.

use sha2::{Digest, Sha256};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDescriptor {
    pub os: String,
    pub arch: String,
    pub hostname: String,
    pub user: String,
    pub lang: String,
}

impl DeviceDescriptor {
    pub fn current() -> Self {
        let env = |key: &str| std::env::var(key).unwrap_or_default();

        Self {
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
            hostname: env("HOSTNAME"),
            user: std::env::var("USER").unwrap_or_else(|_| env("USERNAME")),
            lang: env("LANG"),
        }
    }

    pub fn tag(&self) -> String {
        let mut hasher = Sha256::new();
        for part in [&self.os, &self.arch, &self.hostname, &self.user, &self.lang] {
            hasher.update(part.as_bytes());
            hasher.update([0u8]);
        }
        hex::encode(&hasher.finalize()[..6])
    }
}

pub fn device_tag() -> String {
    DeviceDescriptor::current().tag()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_is_stable_and_short() {
        let descriptor = DeviceDescriptor {
            os: "linux".to_string(),
            arch: "x86_64".to_string(),
            hostname: "kiosk-1".to_string(),
            user: "visitor".to_string(),
            lang: "es_ES.UTF-8".to_string(),
        };

        let tag = descriptor.tag();
        assert_eq!(tag.len(), 12);
        assert_eq!(tag, descriptor.clone().tag());

        let other = DeviceDescriptor {
            hostname: "kiosk-2".to_string(),
            ..descriptor
        };
        assert_ne!(tag, other.tag());
    }
}
