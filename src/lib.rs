//! Асинхронный клиент закрытого REST API Byte.
//!
//! Ядро библиотеки превращает JSON ответы в типизированные сущности
//! ([`models`]) и разбирает общий конверт `{success, data?, error?}`
//! ([`Response`]). Транспорт и методы конечных точек лежат в [`api`] и
//! [`client`].

pub mod api;
pub mod client;
pub mod config;
pub mod decode;
pub mod error;
pub mod models;
pub mod response;

pub use api::{ApiRequest, HttpTransport, RequestBody, Transport};
pub use client::{ByteClient, ProfileUpdate};
pub use config::Config;
pub use decode::{Fields, FromJson, JsonInput};
pub use error::{ClientError, ClientResult, DecodeError, DecodeResult};
pub use models::{
    Account, Accounts, Color, Colors, Comment, Error, Feed, LoopCounter, Mention, Post, Range,
    Rebyte,
};
pub use response::{RawResponse, Response};
