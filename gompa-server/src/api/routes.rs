macro_rules! v1_path {
    ($path:literal) => {
        concat!("/api/v1", $path)
    };
}

pub const PING: &str = "/ping";
pub const HEALTH: &str = "/health";

/// Versioned API route definitions.
pub mod v1 {
    pub const ROOT: &str = "/api/v1";

    pub mod sites {
        pub const COLLECTION: &str = v1_path!("/sites");
        pub const ITEM: &str = v1_path!("/sites/{id}");
    }

    pub mod tours {
        pub const COLLECTION: &str = v1_path!("/tours");
        pub const ITEM: &str = v1_path!("/tours/{id}");
    }

    pub mod audio_guides {
        pub const COLLECTION: &str = v1_path!("/audio-guides");
        pub const ITEM: &str = v1_path!("/audio-guides/{id}");
    }

    pub mod map {
        pub const VIEW: &str = v1_path!("/map");
    }

    pub mod admin {
        pub const DASHBOARD: &str = v1_path!("/admin");
        pub const SITES: &str = v1_path!("/admin/sites");
        pub const SITE: &str = v1_path!("/admin/sites/{id}");
    }
}

/// Helpers for turning route templates into concrete request paths.
pub mod utils {
    /// Replace a single path parameter (e.g. `"{id}"`) with the provided value.
    pub fn replace_param(
        route: &str,
        param: &str,
        value: impl AsRef<str>,
    ) -> String {
        route.replace(param, value.as_ref())
    }

    /// Append query parameters to the provided route.
    pub fn with_query(route: &str, params: &[(&str, &str)]) -> String {
        if params.is_empty() {
            return route.to_string();
        }

        let mut path =
            String::with_capacity(route.len() + 1 + params.len() * 8);
        path.push_str(route);
        path.push('?');

        for (i, (key, value)) in params.iter().enumerate() {
            if i > 0 {
                path.push('&');
            }
            path.push_str(key);
            path.push('=');
            path.push_str(value);
        }

        path
    }

}
