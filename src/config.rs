use anyhow::Result;
use dotenvy::dotenv;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub kafka_bootstrap_servers: String,
    pub kafka_topic: String,
    pub kafka_group_id: String,
    pub kafka_auto_offset_reset: String,
    pub kafka_sasl_mechanism: String,
    pub kafka_username: String,
    pub kafka_password: String,
    pub kafka_security_protocol: String,
    pub kafka_max_retries: u32,
    pub kafka_circuit_breaker_cooldown: u64,
    pub database_url: String,
    pub db_max_connections: u32,
    pub translation_mode: String,
    pub translation_cache: bool,
    pub ingest_concurrency: usize,
    pub log_level: String,
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        dotenv().ok();

        let kafka_bootstrap_servers = var_or("KAFKA_BOOTSTRAP_SERVERS", "localhost:9092");
        let kafka_topic = var_or("KAFKA_TOPIC", "swpc-alerts");
        let kafka_group_id = var_or("KAFKA_GROUP_ID", "swpc-alerts-consumer");
        let kafka_auto_offset_reset = var_or("KAFKA_AUTO_OFFSET_RESET", "latest");
        let kafka_sasl_mechanism = var_or("KAFKA_SASL_MECHANISM", "SCRAM-SHA-256");
        let kafka_username = env::var("KAFKA_USERNAME").unwrap_or_default();
        let kafka_password = env::var("KAFKA_PASSWORD").unwrap_or_default();
        let kafka_security_protocol = var_or("KAFKA_SECURITY_PROTOCOL", "SASL_PLAINTEXT");
        let kafka_max_retries = var_or("KAFKA_MAX_RETRIES", "5").parse().unwrap_or(5);
        let kafka_circuit_breaker_cooldown = var_or("KAFKA_CIRCUIT_BREAKER_COOLDOWN", "300")
            .parse()
            .unwrap_or(300);

        let db_host = var_or("DB_HOST", "localhost");
        let db_port = var_or("DB_PORT", "5432");
        let db_name = var_or("DB_DATABASE", "space_weather");
        let db_user = var_or("DB_USER", "swpc");
        let db_pwd = var_or("DB_PWD", "swpc");

        let database_url = format!(
            "postgres://{}:{}@{}:{}/{}",
            db_user, db_pwd, db_host, db_port, db_name
        );
        let db_max_connections = var_or("DB_MAX_CONNECTIONS", "50").parse().unwrap_or(50);

        let translation_mode = var_or("TRANSLATION_MODE", "glossary");
        let translation_cache = parse_bool(&var_or("TRANSLATION_CACHE", "true")).unwrap_or(true);
        let ingest_concurrency = var_or("INGEST_CONCURRENCY", "4")
            .parse()
            .ok()
            .filter(|n: &usize| *n > 0)
            .unwrap_or(4);

        let log_level = var_or("LOG_LEVEL", "info");

        Ok(Self {
            kafka_bootstrap_servers,
            kafka_topic,
            kafka_group_id,
            kafka_auto_offset_reset,
            kafka_sasl_mechanism,
            kafka_username,
            kafka_password,
            kafka_security_protocol,
            kafka_max_retries,
            kafka_circuit_breaker_cooldown,
            database_url,
            db_max_connections,
            translation_mode,
            translation_cache,
            ingest_concurrency,
            log_level,
        })
    }
}
