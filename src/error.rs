//! Содержит тип ошибки и результата, описывающие неуспешное чтение или запись потока,
//! а также неуспешную сериализацию или десериализацию через него.
use std::error;
use std::fmt;
use std::result;
use std::string::FromUtf8Error;
use serde::{de, ser};

use stream::Mode;

/// Варианты ошибок, которые может запомнить [поток] или вернуть сериализатор
///
/// [поток]: ../stream/struct.Stream.html
#[derive(Clone, Debug, PartialEq)]
pub enum Error {
  /// В потоке осталось меньше байт, чем требуется для чтения поля. Позиция потока
  /// при этом не изменяется.
  Eof {
    /// Позиция потока в момент неудачного чтения
    position: usize,
    /// Количество байт, которое требовалось прочитать
    needed: usize,
  },
  /// Операция не допустима в данном режиме потока: чтение сырых байт из потока
  /// записи или запись в поток чтения. Содержит режим, в котором находился поток
  Mode(Mode),
  /// Прочитанные байты строки не являются корректной последовательностью UTF-8
  Encoding(FromUtf8Error),
  /// Прочитанные байты не образуют ни одного символа в UTF-8
  InvalidChar,
  /// Байт, прочитанный для `bool`, не равен ни `0`, ни `1`
  InvalidBool(u8),
  /// Тип модели serde не может быть однозначно прочитан из потока
  Unsupported(&'static str),
  /// Ошибка сериализации или десериализации стороннего типа
  Unknown(String),
}
/// Результат операции над потоком
pub type Result<T> = result::Result<T, Error>;

impl Error {
  /// Возвращает `true`, если ошибка вызвана нехваткой данных в потоке
  #[inline]
  pub fn is_eof(&self) -> bool {
    match *self {
      Error::Eof { .. } => true,
      _ => false,
    }
  }
}

impl fmt::Display for Error {
  fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
    match *self {
      Error::Eof { position, needed } => write!(fmt, "unexpected end of data: {} bytes needed at position {}", needed, position),
      Error::Mode(Mode::Reading) => fmt.write_str("stream is in reading mode"),
      Error::Mode(Mode::Writing) => fmt.write_str("stream is in writing mode"),
      Error::Encoding(ref err) => write!(fmt, "invalid UTF-8 string: {}", err),
      Error::InvalidChar => fmt.write_str("invalid UTF-8 character"),
      Error::InvalidBool(byte) => write!(fmt, "invalid bool value: {:#04x}", byte),
      Error::Unsupported(msg) => fmt.write_str(msg),
      Error::Unknown(ref msg) => fmt.write_str(msg),
    }
  }
}

impl error::Error for Error {
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    match *self {
      Error::Encoding(ref err) => Some(err),
      _ => None,
    }
  }
}
// Конвертация из ошибок сериализации сторонних типов
impl ser::Error for Error {
  fn custom<T: fmt::Display>(msg: T) -> Self {
    Error::Unknown(msg.to_string())
  }
}
impl de::Error for Error {
  fn custom<T: fmt::Display>(msg: T) -> Self {
    Error::Unknown(msg.to_string())
  }
}
impl From<FromUtf8Error> for Error {
  fn from(err: FromUtf8Error) -> Self {
    Error::Encoding(err)
  }
}
