use chrono::NaiveTime;
use chrono_tz::Tz;
use dotenvy::dotenv;
use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub server_addr: String,
    pub access_token_ttl: usize,

    // Rate limiting
    pub rate_login_per_min: u32,
    pub rate_protected_per_min: u32,

    pub api_prefix: String,

    /// Timezone all attendance days are anchored to
    pub org_timezone: Tz,
    /// Local time of day after which the absence sweep may run
    pub sweep_cutoff: NaiveTime,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            server_addr: env::var("SERVER_ADDR").expect("SERVER_ADDR must be set"),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            access_token_ttl: env::var("ACCESS_TOKEN_TTL")
                .unwrap_or_else(|_| "900".to_string()) // default 15 min
                .parse()
                .unwrap(),

            rate_login_per_min: env::var("RATE_LOGIN_PER_MIN")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .unwrap(),
            rate_protected_per_min: env::var("RATE_PROTECTED_PER_MIN")
                .unwrap_or_else(|_| "1000".to_string())
                .parse()
                .unwrap(),

            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api/v1".to_string()),

            org_timezone: env::var("ORG_TIMEZONE")
                .unwrap_or_else(|_| "Asia/Jakarta".to_string())
                .parse()
                .expect("ORG_TIMEZONE must be a valid IANA timezone"),
            sweep_cutoff: NaiveTime::parse_from_str(
                &env::var("SWEEP_CUTOFF").unwrap_or_else(|_| "16:00".to_string()),
                "%H:%M",
            )
            .expect("SWEEP_CUTOFF must be HH:MM"),
        }
    }
}
