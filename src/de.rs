//! Содержит десериализатор serde, читающий значения из [потока] как POD типы.
//!
//! [потока]: ../stream/struct.Stream.html

use std::str;
use serde::de::{self, DeserializeOwned, DeserializeSeed, SeqAccess, Visitor};

use error::{Error, Result};
use stream::{Mode, Stream};

/// Структура для десериализации значений Rust из потока чтения через его методы доступа.
///
/// # Правила десериализации
/// Все типы читаются симметрично [сериализатору]: для всех целых типов читается соответствующее
/// их разрядности количество байт в порядке `Little-Endian`, числа с плавающей точкой
/// восстанавливаются из битового представления.
///
/// Для структур и кортежей последовательно читаются их поля, без разделителей между ними.
///
/// Тип [`()`] при десериализации всегда считается присутствующим, когда запрашивается.
/// [Newtype] типы десериализуются, как оборачиваемое ими значение.
///
/// `bool` читается из одного байта, который должен быть равен `0` или `1`, иначе возвращается
/// ошибка [`Error::InvalidBool`].
///
/// Строки и байтовые массивы читаются до конца потока, так как их длина нигде не записана.
/// Некорректные UTF-8 данные приводят к ошибке [`Error::Encoding`]. Символ читается из
/// стольких байт, сколько занимает его UTF-8 представление.
///
/// Последовательности без определенной длины (например, [вектор]) читаются до тех пор, пока
/// в потоке остаются данные, а последовательности с известной длиной (массивы, кортежи)
/// читают ровно запрошенное количество элементов. Элементы, не занимающие ни одного байта,
/// в последовательностях без длины не поддерживаются.
///
/// # Неподдерживаемые методы
/// Для [`Option`], перечислений, отображений, идентификаторов и произвольных данных
/// формат не содержит информации, позволяющей их различить, поэтому их чтение приводит
/// к ошибке [`Error::Unsupported`]. Сериализатор таким образом несимметричен по отношению
/// к десериализатору: не все, что может быть записано, может быть прочитано.
///
/// [сериализатору]: ../ser/struct.Serializer.html
/// [`()`]: https://doc.rust-lang.org/std/primitive.unit.html
/// [Newtype]: https://doc.rust-lang.org/rust-by-example/generics/new_types.html
/// [`Error::InvalidBool`]: ../error/enum.Error.html#variant.InvalidBool
/// [`Error::Encoding`]: ../error/enum.Error.html#variant.Encoding
/// [вектор]: https://doc.rust-lang.org/std/vec/struct.Vec.html
/// [`Option`]: https://doc.rust-lang.org/std/option/enum.Option.html
/// [`Error::Unsupported`]: ../error/enum.Error.html#variant.Unsupported
pub struct Deserializer<'s> {
  /// Источник данных для десериализации
  stream: &'s mut Stream,
}

impl<'s> Deserializer<'s> {
  /// Создает десериализатор, читающий данные с текущей позиции указанного потока
  pub fn new(stream: &'s mut Stream) -> Self {
    Deserializer { stream }
  }
  /// Проверяет, что поток читает данные и еще не содержит ошибки. Методы доступа потока
  /// записи записали бы значение вместо чтения
  fn readable(&self) -> Result<()> {
    if !self.stream.is_reading() {
      return Err(Error::Mode(Mode::Writing));
    }
    self.stream.check()
  }
  /// Читает все оставшиеся в потоке данные
  fn read_to_end(&mut self) -> Result<Vec<u8>> {
    self.readable()?;
    let len = self.stream.remaining();
    Ok(self.stream.read_bytes(len).to_vec())
  }
  /// Читает из потока один символ в кодировке UTF-8. Ширина символа определяется по его
  /// первому байту, после чего дочитываются остальные
  fn read_char(&mut self) -> Result<char> {
    self.readable()?;
    let mut buf = [0u8; 4];
    self.stream.raw(&mut buf[..1]);
    self.stream.check()?;

    let width = match buf[0] {
      0x00..=0x7F => return Ok(buf[0] as char),
      0xC2..=0xDF => 2,
      0xE0..=0xEF => 3,
      0xF0..=0xF4 => 4,
      _ => return Err(Error::InvalidChar),
    };
    self.stream.raw(&mut buf[1..width]);
    self.stream.check()?;

    str::from_utf8(&buf[..width]).ok()
      .and_then(|s| s.chars().next())
      .ok_or(Error::InvalidChar)
  }
}

/// Макрос, генерирующий код десериализации числовых типов через методы доступа потока
macro_rules! impl_numbers {
  ($dser_method:ident, $visitor_method:ident, $ty:ident) => {
    fn $dser_method<V>(self, visitor: V) -> Result<V::Value>
      where V: Visitor<'de>,
    {
      self.readable()?;
      let mut value: $ty = Default::default();
      self.stream.$ty(&mut value);
      self.stream.check()?;
      visitor.$visitor_method(value)
    }
  }
}
/// Макрос, генерирующий метод, возвращающий ошибку [`Error::Unsupported`]
///
/// [`Error::Unsupported`]: ../error/enum.Error.html#variant.Unsupported
macro_rules! unsupported {
  ($dser_method:ident) => {
    fn $dser_method<V>(self, _visitor: V) -> Result<V::Value>
      where V: Visitor<'de>,
    {
      Err(Error::Unsupported(concat!('`', stringify!($dser_method), "` is not supported")))
    }
  }
}

impl<'de, 'a, 's> de::Deserializer<'de> for &'a mut Deserializer<'s> {
  type Error = Error;

  impl_numbers!(deserialize_i8, visit_i8, i8);
  impl_numbers!(deserialize_u8, visit_u8, u8);
  impl_numbers!(deserialize_i16, visit_i16, i16);
  impl_numbers!(deserialize_u16, visit_u16, u16);
  impl_numbers!(deserialize_i32, visit_i32, i32);
  impl_numbers!(deserialize_u32, visit_u32, u32);
  impl_numbers!(deserialize_i64, visit_i64, i64);
  impl_numbers!(deserialize_u64, visit_u64, u64);
  impl_numbers!(deserialize_i128, visit_i128, i128);
  impl_numbers!(deserialize_u128, visit_u128, u128);
  impl_numbers!(deserialize_f32, visit_f32, f32);
  impl_numbers!(deserialize_f64, visit_f64, f64);

  /// Читает 1 байт: `0x00` -- это `false`, `0x01` -- `true`
  fn deserialize_bool<V>(self, visitor: V) -> Result<V::Value>
    where V: Visitor<'de>,
  {
    self.readable()?;
    let mut byte = 0;
    self.stream.u8(&mut byte);
    self.stream.check()?;
    match byte {
      0 => visitor.visit_bool(false),
      1 => visitor.visit_bool(true),
      _ => Err(Error::InvalidBool(byte)),
    }
  }
  fn deserialize_char<V>(self, visitor: V) -> Result<V::Value>
    where V: Visitor<'de>,
  {
    visitor.visit_char(self.read_char()?)
  }
  #[inline]
  fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where V: Visitor<'de>,
  {
    de::Deserializer::deserialize_string(self, visitor)
  }
  /// Читает байты до конца потока и интерпретирует их, как строку в кодировке UTF-8
  fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where V: Visitor<'de>,
  {
    let buf = self.read_to_end()?;
    visitor.visit_string(String::from_utf8(buf)?)
  }
  #[inline]
  fn deserialize_bytes<V>(self, visitor: V) -> Result<V::Value>
    where V: Visitor<'de>,
  {
    de::Deserializer::deserialize_byte_buf(self, visitor)
  }
  fn deserialize_byte_buf<V>(self, visitor: V) -> Result<V::Value>
    where V: Visitor<'de>,
  {
    visitor.visit_byte_buf(self.read_to_end()?)
  }
  fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where V: Visitor<'de>,
  {
    visitor.visit_unit()
  }
  fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where V: Visitor<'de>,
  {
    visitor.visit_unit()
  }
  fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where V: Visitor<'de>,
  {
    visitor.visit_newtype_struct(self)
  }
  /// Читает элементы последовательности, пока в потоке остаются данные
  fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where V: Visitor<'de>,
  {
    visitor.visit_seq(self)
  }
  fn deserialize_tuple<V>(self, len: usize, visitor: V) -> Result<V::Value>
    where V: Visitor<'de>,
  {
    visitor.visit_seq(Tuple { de: self, count: len })
  }
  #[inline]
  fn deserialize_tuple_struct<V>(self, _name: &'static str, len: usize, visitor: V) -> Result<V::Value>
    where V: Visitor<'de>,
  {
    de::Deserializer::deserialize_tuple(self, len, visitor)
  }
  /// Читает структуру, как кортеж из ее полей. Важно только количество полей, их имена игнорируются
  #[inline]
  fn deserialize_struct<V>(self, _name: &'static str, fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where V: Visitor<'de>,
  {
    de::Deserializer::deserialize_tuple(self, fields.len(), visitor)
  }

  unsupported!(deserialize_any);
  unsupported!(deserialize_map);
  unsupported!(deserialize_option);
  unsupported!(deserialize_identifier);
  unsupported!(deserialize_ignored_any);
  fn deserialize_enum<V>(self, _name: &'static str, _variants: &'static [&'static str], _visitor: V) -> Result<V::Value>
    where V: Visitor<'de>,
  {
    Err(Error::Unsupported("`deserialize_enum` is not supported"))
  }

  fn is_human_readable(&self) -> bool { false }
}

/// Последовательность с известным количеством элементов: массив, кортеж или структура
struct Tuple<'a, 's: 'a> {
  de: &'a mut Deserializer<'s>,
  /// Количество элементов, которое осталось прочитать
  count: usize,
}
impl<'de, 'a, 's> SeqAccess<'de> for Tuple<'a, 's> {
  type Error = Error;

  fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where T: DeserializeSeed<'de>,
  {
    if self.count == 0 {
      return Ok(None);
    }
    self.count -= 1;
    seed.deserialize(&mut *self.de).map(Some)
  }

  fn size_hint(&self) -> Option<usize> { Some(self.count) }
}

impl<'de, 'a, 's> SeqAccess<'de> for &'a mut Deserializer<'s> {
  type Error = Error;

  fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where T: DeserializeSeed<'de>,
  {
    self.readable()?;
    if self.stream.remaining() == 0 {
      return Ok(None);
    }
    // Элемент, не читающий ни одного байта, никогда не исчерпал бы поток
    let start = self.stream.position();
    let value = seed.deserialize(&mut **self)?;
    if self.stream.position() == start {
      return Err(Error::Unsupported("zero-sized sequence elements are not supported"));
    }
    Ok(Some(value))
  }
}

/// Десериализует значение заданного типа, начиная с текущей позиции потока чтения.
/// После успешного чтения позиция потока указывает на первый непрочитанный байт.
///
/// # Ошибки
/// - Реализация `Deserialize` для типа `T` вернет ошибку
/// - [`Error::Eof`]: в потоке не хватило данных. Ошибка также запоминается в потоке
/// - [`Error::Mode`]: поток находится в режиме записи
/// - поток уже содержал ошибку до начала чтения
///
/// [`Error::Eof`]: ../error/enum.Error.html#variant.Eof
/// [`Error::Mode`]: ../error/enum.Error.html#variant.Mode
pub fn from_stream<T>(stream: &mut Stream) -> Result<T>
  where T: DeserializeOwned,
{
  let mut deserializer = Deserializer::new(stream);
  deserializer.readable()?;
  T::deserialize(&mut deserializer)
}

/// Десериализует значение заданного типа из копии массива байт. Байты, оставшиеся
/// непрочитанными, игнорируются
pub fn from_bytes<T>(storage: &[u8]) -> Result<T>
  where T: DeserializeOwned,
{
  from_stream(&mut Stream::copy_from_slice(storage))
}

////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod integers {
  use super::from_bytes;
  use error::Error;

  #[test]
  fn test_u8() {
    assert_eq!(from_bytes::<u8>(&[0x12]).unwrap(), 0x12);
  }
  #[test]
  fn test_i8() {
    assert_eq!(from_bytes::<i8>(&[0x7F]).unwrap(), 127);
    assert_eq!(from_bytes::<i8>(&[0xFF]).unwrap(), -1);
  }

  #[test]
  fn test_u16() {
    assert_eq!(from_bytes::<u16>(&[0xCD, 0xAB]).unwrap(), 0xABCD);
  }
  #[test]
  fn test_i16() {
    assert_eq!(from_bytes::<i16>(&[0x34, 0x12]).unwrap(), 0x1234);
  }

  #[test]
  fn test_u32() {
    assert_eq!(from_bytes::<u32>(&[0x78, 0x56, 0x34, 0x12]).unwrap(), 0x12345678);
  }
  #[test]
  fn test_i32() {
    assert_eq!(from_bytes::<i32>(&[0xFE, 0xFF, 0xFF, 0xFF]).unwrap(), -2);
  }

  #[test]
  fn test_u64() {
    assert_eq!(from_bytes::<u64>(&[0xEF, 0xCD, 0xAB, 0x90, 0x78, 0x56, 0x34, 0x12]).unwrap(), 0x12345678_90ABCDEF);
  }
  #[test]
  fn test_u128() {
    let test: u128 = 0x12345678_90ABCDEF_12345678_90ABCDEF;
    assert_eq!(from_bytes::<u128>(&[0xEF, 0xCD, 0xAB, 0x90, 0x78, 0x56, 0x34, 0x12, 0xEF, 0xCD, 0xAB, 0x90, 0x78, 0x56, 0x34, 0x12]).unwrap(), test);
  }

  #[test]
  fn test_no_data() {
    assert_eq!(from_bytes::<u16>(&[0x12]), Err(Error::Eof { position: 0, needed: 2 }));
    assert_eq!(from_bytes::<u8>(&[]), Err(Error::Eof { position: 0, needed: 1 }));
  }
}
#[cfg(test)]
mod roundtrip {
  use super::from_bytes;
  use ser::to_vec;

  #[derive(Debug, Serialize, Deserialize, PartialEq)]
  struct Packet {
    kind: u8,
    seq: u32,
    pos: (f32, f32),
    delta: i16,
    alive: bool,
    checksum: [u8; 4],
  }

  quickcheck! {
    fn test_packet(kind: u8, seq: u32, x: f32, y: f32, delta: i16, alive: bool) -> bool {
      let packet = Packet { kind, seq, pos: (x, y), delta, alive, checksum: [1, 2, 3, 4] };
      let bytes = to_vec(&packet).unwrap();
      bytes.len() == 1 + 4 + 8 + 2 + 1 + 4 && from_bytes::<Packet>(&bytes).unwrap() == packet
    }
  }
}
