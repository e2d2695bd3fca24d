use tracing_subscriber::EnvFilter;

pub fn default_filter(debug: bool) -> &'static str {
    if debug {
        "qr_camera_backend=debug"
    } else {
        "qr_camera_backend=info"
    }
}

/// Install the global subscriber. `RUST_LOG` wins over the profile default.
/// Runs before the config is resolved so resolution warnings are not lost.
pub fn init(debug: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(debug)));

    // Already installed on a second call.
    tracing_subscriber::fmt().with_env_filter(filter).try_init().ok();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Profile;

    #[test]
    fn test_default_filter_follows_debug() {
        assert_eq!(default_filter(true), "qr_camera_backend=debug");
        assert_eq!(default_filter(false), "qr_camera_backend=info");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init(Profile::Development.debug_enabled());
        init(Profile::Production.debug_enabled());
    }
}
