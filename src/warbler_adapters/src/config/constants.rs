pub mod env {
    pub const CONFIG_DIR_ENV_VAR: &str = "WARBLER_CONFIG_DIR";
    pub const ENV_PREFIX: &str = "WARBLER";
    pub const ENV_SEPARATOR: &str = "__";
}

pub mod prod {
    pub const APP_ADDRESS: &str = "0.0.0.0:3000";
    pub const CONFIG_DIR: &str = "config";
    pub mod object_store {
        pub const BASE_URL: &str = "http://localhost:9000/";
        pub const PUBLIC_BASE_URL: &str = "http://localhost:9000/";
        pub const BUCKET: &str = "warbler";
        pub const TIMEOUT_IN_MILLIS: u64 = 30_000;
        pub const CHUNK_SIZE: usize = 64 * 1024;
    }
    pub mod registration {
        pub const JPEG_QUALITY: u8 = 10;
        pub const UPLOAD_TIMEOUT_IN_MILLIS: u64 = 60_000;
        pub const ACCOUNT_TIMEOUT_IN_MILLIS: u64 = 15_000;
        pub const PERSIST_TIMEOUT_IN_MILLIS: u64 = 15_000;
        pub const MAX_REQUEST_BYTES: usize = 10 * 1024 * 1024;
    }
}

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";
    pub const PUBLIC_BASE_URL: &str = "https://cdn.warbler.test";
}
