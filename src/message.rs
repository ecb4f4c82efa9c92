//! Содержит типаж сообщения, поля которого перечисляются один раз и для записи, и для чтения.

use error::Result;
use stream::Stream;

/// Сообщение с фиксированным порядком полей.
///
/// Реализация вызывает методы доступа потока для каждого поля в порядке их следования
/// в сообщении. Режим потока определяет, будут ли поля записаны или прочитаны, поэтому
/// формат сообщения описывается ровно в одном месте.
///
/// # Пример
/// ```
/// # use pod_cursor::{decode, encode, Message, Stream};
/// #[derive(Debug, Default, PartialEq)]
/// struct Ping { seq: u32, rtt: f64 }
///
/// impl Message for Ping {
///   fn visit(&mut self, stream: &mut Stream) {
///     stream.u32(&mut self.seq);
///     stream.f64(&mut self.rtt);
///   }
/// }
///
/// let bytes = encode(&mut Ping { seq: 1, rtt: 0.25 }).unwrap();
/// assert_eq!(bytes.len(), 12);
/// assert_eq!(decode::<Ping>(&bytes).unwrap(), Ping { seq: 1, rtt: 0.25 });
/// ```
pub trait Message {
  /// Передает все поля сообщения через поток в порядке их следования
  fn visit(&mut self, stream: &mut Stream);
}

impl<'a, M: Message + ?Sized> Message for &'a mut M {
  #[inline]
  fn visit(&mut self, stream: &mut Stream) {
    (**self).visit(stream)
  }
}

impl Stream {
  /// Передает поля вложенного сообщения через данный поток
  #[inline]
  pub fn visit<M: Message + ?Sized>(&mut self, message: &mut M) {
    message.visit(self)
  }
}

/// Записывает сообщение в новый поток и возвращает полученные байты
pub fn encode<M: Message + ?Sized>(message: &mut M) -> Result<Vec<u8>> {
  let mut stream = Stream::new();
  message.visit(&mut stream);
  stream.finish()
}

/// Читает сообщение из копии указанных байт. Байты, оставшиеся после последнего поля,
/// игнорируются.
///
/// # Ошибки
/// [`Error::Eof`], если данных не хватило хотя бы на одно поле. Частично прочитанное
/// сообщение в этом случае не возвращается
///
/// [`Error::Eof`]: ../error/enum.Error.html#variant.Eof
pub fn decode<M: Message + Default>(bytes: &[u8]) -> Result<M> {
  let mut message = M::default();
  let mut stream = Stream::copy_from_slice(bytes);
  message.visit(&mut stream);
  stream.check()?;
  Ok(message)
}

/// Читает сообщение из указанных байт без их копирования, заполняя уже существующее значение.
/// При ошибке значение содержит правильно прочитанные начальные поля и нули в остальных,
/// и должно считаться некорректным целиком
pub fn decode_into<M: Message + ?Sized>(message: &mut M, bytes: Vec<u8>) -> Result<()> {
  let mut stream = Stream::for_decoding(bytes);
  message.visit(&mut stream);
  stream.check()
}

////////////////////////////////////////////////////////////////////////////////
