//! Содержит сериализатор serde, записывающий значения в [поток] как POD типы.
//!
//! [поток]: ../stream/struct.Stream.html

use serde::ser::{self, Serialize};

use error::{Error, Result};
use stream::{Mode, Stream};

/// Сериализатор, записывающий значения Rust в поток записи через его методы доступа.
/// Внедрение разделителей и любой другой метаинформации для десериализации остается
/// заботой вызывающего кода.
///
/// # Правила сериализации
/// Все целые типы записываются согласно их разрядности в порядке байт `Little-Endian`,
/// числа с плавающей точкой -- как их битовое представление IEEE-754.
///
/// Для структур и кортежей рекурсивно сериализуются их поля, без разделителей между ними.
///
/// Тип [`()`], [`None`]-вариант [`Option`], а также unit-вариант перечисления никак не записываются
/// в поток. Для [`Some`]-варианта записывается только его значение.
///
/// `bool`-значения сериализуются, как 1 байт со значением `0` или `1`.
///
/// [Newtype] типы сериализуются, как оборачиваемое ими значение.
///
/// Строки и отдельные символы записываются в UTF-8, без нулевого байта и без длины. Байтовые
/// массивы записываются как есть.
///
/// Элементы последовательностей и пары ключ-значение отображений записываются подряд. Ни
/// количество, ни разделители между элементами, ни маркер конца последовательности не записываются.
///
/// [`()`]: https://doc.rust-lang.org/std/primitive.unit.html
/// [`None`]: https://doc.rust-lang.org/std/option/enum.Option.html#variant.None
/// [`Some`]: https://doc.rust-lang.org/std/option/enum.Option.html#variant.Some
/// [`Option`]: https://doc.rust-lang.org/std/option/enum.Option.html
/// [Newtype]: https://doc.rust-lang.org/rust-by-example/generics/new_types.html
pub struct Serializer<'s> {
  /// Поток, в который записываются данные
  stream: &'s mut Stream,
}

impl<'s> Serializer<'s> {
  /// Создает сериализатор, дописывающий данные в указанный поток. Если поток находится в режиме
  /// чтения, первая же запись вернет ошибку [`Error::Mode`]
  ///
  /// [`Error::Mode`]: ../error/enum.Error.html#variant.Mode
  pub fn new(stream: &'s mut Stream) -> Self {
    Serializer { stream }
  }
  /// Методы доступа потока чтения прочитали бы значение вместо записи, поэтому
  /// такой поток отвергается до обращения к ним
  fn writable(&self) -> Result<()> {
    if self.stream.is_reading() {
      return Err(Error::Mode(Mode::Reading));
    }
    self.stream.check()
  }
}

/// Макрос, генерирующий код сериализации числовых типов через методы доступа потока
macro_rules! impl_numbers {
  ($ser_method:ident, $ty:ident) => {
    fn $ser_method(self, mut v: $ty) -> Result<Self::Ok> {
      self.writable()?;
      self.stream.$ty(&mut v);
      self.stream.check()
    }
  }
}

impl<'a, 's> ser::Serializer for &'a mut Serializer<'s> {
  type Ok = ();
  type Error = Error;

  type SerializeSeq = Self;
  type SerializeTuple = Self;
  type SerializeTupleStruct = Self;
  type SerializeTupleVariant = Self;
  type SerializeMap = Self;
  type SerializeStruct = Self;
  type SerializeStructVariant = Self;

  impl_numbers!(serialize_i8, i8);
  impl_numbers!(serialize_u8, u8);
  impl_numbers!(serialize_i16, i16);
  impl_numbers!(serialize_u16, u16);
  impl_numbers!(serialize_i32, i32);
  impl_numbers!(serialize_u32, u32);
  impl_numbers!(serialize_i64, i64);
  impl_numbers!(serialize_u64, u64);
  impl_numbers!(serialize_i128, i128);
  impl_numbers!(serialize_u128, u128);
  impl_numbers!(serialize_f32, f32);
  impl_numbers!(serialize_f64, f64);

  /// Записывает в поток 1 байт: `0x00` для `false` и `0x01` для `true`
  fn serialize_bool(self, v: bool) -> Result<Self::Ok> { ser::Serializer::serialize_u8(self, v as u8) }
  /// Записывает в поток UTF-8 байты представления указанного символа
  #[inline]
  fn serialize_char(self, v: char) -> Result<Self::Ok> {
    let mut buf = [0u8; 4];
    ser::Serializer::serialize_str(self, v.encode_utf8(&mut buf))
  }
  #[inline]
  fn serialize_str(self, v: &str) -> Result<Self::Ok> {
    ser::Serializer::serialize_bytes(self, v.as_bytes())
  }
  /// Записывает в поток байты указанного массива как есть
  fn serialize_bytes(self, v: &[u8]) -> Result<Self::Ok> {
    self.writable()?;
    self.stream.write_bytes(v);
    self.stream.check()
  }

  fn serialize_none(self) -> Result<Self::Ok> { Ok(()) }
  fn serialize_some<T>(self, value: &T) -> Result<Self::Ok>
    where T: ?Sized + Serialize,
  {
    value.serialize(self)
  }
  fn serialize_unit(self) -> Result<Self::Ok> { Ok(()) }
  fn serialize_unit_struct(self, _name: &'static str) -> Result<Self::Ok> { Ok(()) }
  fn serialize_unit_variant(
    self, _name: &'static str, _variant_index: u32, _variant: &'static str
  ) -> Result<Self::Ok> { Ok(()) }

  fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Self::Ok>
    where T: ?Sized + Serialize,
  {
    value.serialize(self)
  }
  /// Записывает в поток только значение варианта, его индекс не записывается
  fn serialize_newtype_variant<T>(
    self, _name: &'static str, _variant_index: u32, _variant: &'static str, value: &T
  ) -> Result<Self::Ok>
    where T: ?Sized + Serialize,
  {
    value.serialize(self)
  }

//-------------------------------------------------------------------------------------------------
  fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> { Ok(self) }
  fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> { Ok(self) }
  fn serialize_tuple_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeTupleStruct> { Ok(self) }
  fn serialize_tuple_variant(
    self, _name: &'static str, _variant_index: u32, _variant: &'static str, _len: usize
  ) -> Result<Self::SerializeTupleVariant> { Ok(self) }
  fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> { Ok(self) }
  fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> { Ok(self) }
  fn serialize_struct_variant(
    self, _name: &'static str, _variant_index: u32, _variant: &'static str, _len: usize
  ) -> Result<Self::SerializeStructVariant> { Ok(self) }

  fn is_human_readable(&self) -> bool { false }
}

/// Генерирует реализацию типажа составного значения, сериализующего каждый
/// переданный ему элемент тем же сериализатором
macro_rules! impl_compound {
  ($tr:ident :: $method:ident $(, $key:ty)*) => {
    impl<'a, 's> ser::$tr for &'a mut Serializer<'s> {
      type Ok = ();
      type Error = Error;

      fn $method<T>(&mut self, $(_key: $key,)* value: &T) -> Result<Self::Ok>
        where T: ?Sized + Serialize,
      {
        value.serialize(&mut **self)
      }
      fn end(self) -> Result<Self::Ok> { Ok(()) }
    }
  }
}

impl_compound!(SerializeSeq::serialize_element);
impl_compound!(SerializeTuple::serialize_element);
impl_compound!(SerializeTupleStruct::serialize_field);
impl_compound!(SerializeTupleVariant::serialize_field);
impl_compound!(SerializeStruct::serialize_field, &'static str);
impl_compound!(SerializeStructVariant::serialize_field, &'static str);

impl<'a, 's> ser::SerializeMap for &'a mut Serializer<'s> {
  type Ok = ();
  type Error = Error;

  fn serialize_key<T>(&mut self, key: &T) -> Result<Self::Ok>
    where T: ?Sized + Serialize,
  {
    key.serialize(&mut **self)
  }
  fn serialize_value<T>(&mut self, value: &T) -> Result<Self::Ok>
    where T: ?Sized + Serialize,
  {
    value.serialize(&mut **self)
  }
  fn end(self) -> Result<Self::Ok> { Ok(()) }
}

/// Сериализует указанное значение в поток записи.
///
/// # Ошибки
/// - Реализация `Serialize` для типа `T` вернет ошибку
/// - [`Error::Mode`]: поток находится в режиме чтения
/// - поток уже содержал ошибку до начала записи
///
/// [`Error::Mode`]: ../error/enum.Error.html#variant.Mode
#[inline]
pub fn to_stream<T>(stream: &mut Stream, value: &T) -> Result<()>
  where T: ?Sized + Serialize,
{
  stream.check()?;
  value.serialize(&mut Serializer::new(stream))
}

/// Сериализует указанное значение в массив байт
#[inline]
pub fn to_vec<T>(value: &T) -> Result<Vec<u8>>
  where T: ?Sized + Serialize,
{
  let mut stream = Stream::new();
  to_stream(&mut stream, value)?;
  stream.finish()
}
////////////////////////////////////////////////////////////////////////////////
