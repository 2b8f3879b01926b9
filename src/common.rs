pub use std::collections::HashMap;
pub use std::io::Write;
pub use std::net::SocketAddr;
pub use std::sync::atomic::{AtomicBool, Ordering};
pub use std::sync::Arc;

pub use tokio::time::{interval, Duration, MissedTickBehavior};

pub use log::{debug, error, info, warn};

pub use flexi_logger::{
    Age, Cleanup, Criterion, DeferredNow, Duplicate, FileSpec, Logger, LoggerHandle, Naming,
    Record,
};

pub use serde::de::DeserializeOwned;
pub use serde::{Deserialize, Serialize};
pub use serde_json::{json, Value};

pub use elasticsearch::auth::Credentials as EsCredentials;
pub use elasticsearch::http::response::Response;
pub use elasticsearch::http::transport::{SingleNodeConnectionPool, Transport as EsTransport, TransportBuilder};
pub use elasticsearch::http::Url;
pub use elasticsearch::nodes::NodesStatsParts;
pub use elasticsearch::Elasticsearch;

pub use reqwest::Client;

pub use prometheus::core::{Collector, Desc};
pub use prometheus::proto::{MetricFamily, MetricType};
pub use prometheus::{Encoder, Registry, TextEncoder};

pub use arc_swap::ArcSwap;

pub use chrono::{DateTime, Utc};

pub use anyhow::anyhow;

pub use derive_builder::Builder;
pub use derive_new::new;
pub use getset::{CopyGetters, Getters};

pub use async_trait::async_trait;

pub use once_cell::sync::Lazy as once_lazy;

pub use dotenv::dotenv;
