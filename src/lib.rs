//! Реализует двунаправленный поток байт для простой сериализации сообщений, наиболее близкой
//! к их представлению в памяти.
//!
//! Основной тип крейта, [`Stream`], работает либо на чтение, либо на запись, а каждое поле
//! сообщения передается через него одним и тем же вызовом метода доступа. Поэтому порядок
//! полей описывается один раз (см. [`Message`]) и не может разойтись между кодом записи
//! и кодом чтения. Все числа записываются в порядке байт `Little-Endian`.
//!
//! Для типов, реализующих типажи serde, тот же формат доступен через [`to_vec`] и [`from_bytes`].
//!
//! [`Stream`]: stream/struct.Stream.html
//! [`Message`]: message/trait.Message.html
//! [`to_vec`]: ser/fn.to_vec.html
//! [`from_bytes`]: de/fn.from_bytes.html
#![deny(missing_docs)]
extern crate serde;
extern crate byteorder;

#[cfg(test)]
#[macro_use]
extern crate serde_derive;
#[cfg(test)]
#[macro_use]
extern crate quickcheck;

pub mod error;
pub mod stream;
pub mod message;
pub mod ser;
pub mod de;

pub use error::{Error, Result};
pub use stream::{Mode, Stream, DEFAULT_CAPACITY};
pub use message::{decode, decode_into, encode, Message};
pub use ser::{to_stream, to_vec};
pub use de::{from_bytes, from_stream};
