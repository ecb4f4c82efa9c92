//! Содержит двунаправленный поток байт, позволяющий одним и тем же кодом описания полей
//! сообщения как записывать сообщение, так и читать его.

use std::cmp;
use byteorder::{ByteOrder, LE};

use error::{Error, Result};

/// Начальная емкость потока записи, создаваемого без явного указания размера.
/// Соответствует типичному MTU сети
pub const DEFAULT_CAPACITY: usize = 1500;

/// Направление работы потока. Определяется при создании потока и больше никогда не меняется
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
  /// Методы доступа к полям читают значения из потока
  Reading,
  /// Методы доступа к полям дописывают значения в поток
  Writing,
}

/// Хранилище байт потока. Поток записи может только расти, поток чтения имеет
/// фиксированный размер
#[derive(Clone, Debug)]
enum Storage {
  Growable(Vec<u8>),
  Fixed(Box<[u8]>),
}

impl Storage {
  #[inline]
  fn as_slice(&self) -> &[u8] {
    match *self {
      Storage::Growable(ref vec) => vec,
      Storage::Fixed(ref buf) => buf,
    }
  }
  #[inline]
  fn into_vec(self) -> Vec<u8> {
    match self {
      Storage::Growable(vec) => vec,
      Storage::Fixed(buf) => buf.into_vec(),
    }
  }
}

/// Поток байт с курсором, работающий либо на чтение, либо на запись.
///
/// # Двунаправленные поля
/// Для каждого числового типа фиксированной ширины у потока есть ровно один метод доступа,
/// принимающий изменяемую ссылку на поле. В режиме [`Mode::Reading`] метод читает значение
/// из потока в поле, в режиме [`Mode::Writing`] -- дописывает текущее значение поля в поток.
/// Поэтому порядок полей сообщения описывается один раз, а кодирование и декодирование
/// получаются вызовом одного и того же кода на потоках в разных режимах:
///
/// ```
/// # use pod_cursor::Stream;
/// struct Point { tag: u8, x: f32 }
///
/// fn fields(point: &mut Point, stream: &mut Stream) {
///   stream.u8(&mut point.tag);
///   stream.f32(&mut point.x);
/// }
///
/// let mut writer = Stream::new();
/// fields(&mut Point { tag: 7, x: 2.5 }, &mut writer);
///
/// let mut reader = writer.copy();
/// let mut point = Point { tag: 0, x: 0.0 };
/// fields(&mut point, &mut reader);
///
/// assert!(reader.error().is_none());
/// assert_eq!((point.tag, point.x), (7, 2.5));
/// ```
///
/// # Формат
/// Все числа записываются в порядке байт `Little-Endian`, знаковые -- в дополнительном коде,
/// числа с плавающей точкой -- как битовое представление IEEE-754 беззнакового числа той же
/// ширины. Никаких заголовков, длин или разделителей не записывается: схемой данных является
/// сама последовательность вызовов методов доступа, и обе стороны обязаны вызывать их в
/// одинаковом порядке.
///
/// # Ошибки
/// Ошибка запоминается в потоке и больше никогда не сбрасывается. После нее все методы доступа
/// ничего не делают: не двигают позицию, не меняют хранилище, а при чтении записывают в поле
/// ноль. Это позволяет прочитать сообщение целиком и проверить [`error()`] один раз в конце.
///
/// [`Mode::Reading`]: enum.Mode.html#variant.Reading
/// [`Mode::Writing`]: enum.Mode.html#variant.Writing
/// [`error()`]: #method.error
#[derive(Debug)]
pub struct Stream {
  /// Прочитанные или записанные данные
  storage: Storage,
  /// Позиция следующего читаемого или записываемого байта
  pos: usize,
  /// Первая возникшая ошибка
  error: Option<Error>,
}

impl Stream {
  /// Создает пустой поток записи с емкостью [`DEFAULT_CAPACITY`]
  ///
  /// [`DEFAULT_CAPACITY`]: constant.DEFAULT_CAPACITY.html
  #[inline]
  pub fn new() -> Self {
    Self::with_capacity(DEFAULT_CAPACITY)
  }
  /// Создает пустой поток записи.
  ///
  /// # Параметры
  /// - `capacity`: Предполагаемый размер сообщения. Это лишь подсказка: запись большего
  ///   количества байт просто увеличит хранилище
  pub fn with_capacity(capacity: usize) -> Self {
    Self::growable(Vec::with_capacity(capacity))
  }
  /// Создает поток над указанными байтами, выбирая режим по их содержимому:
  /// - непустой вектор читается, поток получает [`Mode::Reading`];
  /// - пустой вектор с ненулевой емкостью используется как хранилище потока записи;
  /// - пустой вектор без емкости заменяется хранилищем емкостью [`DEFAULT_CAPACITY`],
  ///   поток получает [`Mode::Writing`].
  ///
  /// Байты не копируются. Если режим должен быть определен явно, используйте
  /// [`for_encoding`] или [`for_decoding`].
  ///
  /// [`Mode::Reading`]: enum.Mode.html#variant.Reading
  /// [`Mode::Writing`]: enum.Mode.html#variant.Writing
  /// [`DEFAULT_CAPACITY`]: constant.DEFAULT_CAPACITY.html
  /// [`for_encoding`]: #method.for_encoding
  /// [`for_decoding`]: #method.for_decoding
  pub fn from_vec(bytes: Vec<u8>) -> Self {
    if !bytes.is_empty() {
      return Self::for_decoding(bytes);
    }
    if bytes.capacity() > 0 {
      return Self::growable(bytes);
    }
    Self::new()
  }
  /// Создает поток чтения над копией указанных байт, поэтому изменения исходного
  /// буфера не влияют на поток
  pub fn copy_from_slice(bytes: &[u8]) -> Self {
    Self::fixed(bytes.into())
  }
  /// Создает поток записи, то же, что и [`new`]
  ///
  /// [`new`]: #method.new
  #[inline]
  pub fn for_encoding() -> Self {
    Self::new()
  }
  /// Создает поток чтения над указанными байтами без копирования. В отличие от [`from_vec`],
  /// пустой вектор также дает поток чтения, любое чтение из которого завершится ошибкой
  ///
  /// [`from_vec`]: #method.from_vec
  #[inline]
  pub fn for_decoding(bytes: Vec<u8>) -> Self {
    Self::fixed(bytes.into_boxed_slice())
  }

  #[inline]
  fn growable(vec: Vec<u8>) -> Self {
    Stream { storage: Storage::Growable(vec), pos: 0, error: None }
  }
  #[inline]
  fn fixed(buf: Box<[u8]>) -> Self {
    Stream { storage: Storage::Fixed(buf), pos: 0, error: None }
  }

//-------------------------------------------------------------------------------------------------
  /// Режим, в котором работает поток
  #[inline]
  pub fn mode(&self) -> Mode {
    match self.storage {
      Storage::Growable(_) => Mode::Writing,
      Storage::Fixed(_) => Mode::Reading,
    }
  }
  /// Возвращает `true`, если поток читает значения полей
  #[inline]
  pub fn is_reading(&self) -> bool { self.mode() == Mode::Reading }
  /// Текущая позиция: количество прочитанных или записанных байт. После [`reset_position`]
  /// в потоке записи может быть меньше [`len`], пока запись не дойдет до конца хранилища
  ///
  /// [`reset_position`]: #method.reset_position
  /// [`len`]: #method.len
  #[inline]
  pub fn position(&self) -> usize { self.pos }
  /// Общее количество байт в хранилище потока
  #[inline]
  pub fn len(&self) -> usize { self.storage.as_slice().len() }
  /// Возвращает `true`, если в хранилище нет ни одного байта
  #[inline]
  pub fn is_empty(&self) -> bool { self.len() == 0 }
  /// Количество байт между текущей позицией и концом хранилища
  #[inline]
  pub fn remaining(&self) -> usize { self.len() - self.pos }
  /// Первая ошибка, возникшая при работе с потоком, если она была
  #[inline]
  pub fn error(&self) -> Option<&Error> { self.error.as_ref() }
  /// Возвращает копию запомненной ошибки, если она была. Удобно для проверки потока
  /// оператором `?` после чтения всех полей
  pub fn check(&self) -> Result<()> {
    match self.error {
      Some(ref err) => Err(err.clone()),
      None => Ok(()),
    }
  }
  /// Перемещает позицию в начало потока, не меняя ни хранилище, ни запомненную ошибку.
  ///
  /// Последующая запись в поток записи перезаписывает уже имеющиеся байты и начинает
  /// дописывать новые только после их окончания. Так можно заполнить заголовок, место
  /// под который было оставлено в начале сообщения.
  #[inline]
  pub fn reset_position(&mut self) { self.pos = 0; }

  /// Возвращает хранилище потока, если при работе с ним не возникло ошибок
  pub fn bytes(&self) -> Result<&[u8]> {
    self.check()?;
    Ok(self.storage.as_slice())
  }
  /// Завершает работу с потоком и возвращает его хранилище, если при работе с ним
  /// не возникло ошибок
  pub fn finish(self) -> Result<Vec<u8>> {
    match self.error {
      Some(err) => Err(err),
      None => Ok(self.storage.into_vec()),
    }
  }
  /// Завершает работу с потоком и возвращает его хранилище вместе с запомненной ошибкой.
  /// Байтам можно доверять, только если ошибки нет
  pub fn into_parts(self) -> (Vec<u8>, Option<Error>) {
    (self.storage.into_vec(), self.error)
  }
  /// Создает независимый поток чтения над копией хранилища, в каком бы режиме ни был
  /// данный поток. Ошибка и позиция не копируются
  pub fn copy(&self) -> Stream {
    Self::copy_from_slice(self.storage.as_slice())
  }

//-------------------------------------------------------------------------------------------------
  /// Проверяет, можно ли прочитать `len` байт, и сдвигает позицию за них. Возвращает
  /// начало прочитанного диапазона, либо запоминает ошибку и возвращает `None`
  fn take(&mut self, len: usize) -> Option<usize> {
    if self.error.is_some() {
      return None;
    }
    if !self.is_reading() {
      self.error = Some(Error::Mode(Mode::Writing));
      return None;
    }
    if self.remaining() < len {
      self.error = Some(Error::Eof { position: self.pos, needed: len });
      return None;
    }
    let start = self.pos;
    self.pos += len;
    Some(start)
  }
  /// Читает `len` байт из потока чтения и возвращает их без копирования.
  ///
  /// Если байт не хватает, запоминает ошибку [`Error::Eof`], не сдвигая позицию. Если
  /// ошибка уже была, ничего не делает. В обоих случаях возвращает пустой срез. Вызов
  /// на потоке записи запоминает ошибку [`Error::Mode`].
  ///
  /// [`Error::Eof`]: ../error/enum.Error.html#variant.Eof
  /// [`Error::Mode`]: ../error/enum.Error.html#variant.Mode
  pub fn read_bytes(&mut self, len: usize) -> &[u8] {
    match self.take(len) {
      Some(start) => &self.storage.as_slice()[start..start + len],
      None => &[],
    }
  }
  /// Дописывает байты в поток записи, увеличивая хранилище при необходимости.
  ///
  /// Ничего не делает, если в потоке уже есть ошибка. Вызов на потоке чтения
  /// запоминает ошибку [`Error::Mode`].
  ///
  /// [`Error::Mode`]: ../error/enum.Error.html#variant.Mode
  pub fn write_bytes(&mut self, src: &[u8]) {
    if self.error.is_some() {
      return;
    }
    let pos = self.pos;
    match self.storage {
      Storage::Growable(ref mut vec) => {
        // После reset_position() часть байт уже есть: перезаписываем их
        let overlap = cmp::min(vec.len() - pos, src.len());
        vec[pos..pos + overlap].copy_from_slice(&src[..overlap]);
        vec.extend_from_slice(&src[overlap..]);
      }
      Storage::Fixed(_) => {
        self.error = Some(Error::Mode(Mode::Reading));
        return;
      }
    }
    self.pos += src.len();
  }
  /// Переносит байты между потоком и `buf`. В режиме записи дописывает `buf` в поток,
  /// в режиме чтения заполняет `buf` байтами из потока, а при нехватке данных обнуляет его
  pub fn raw(&mut self, buf: &mut [u8]) {
    if !self.is_reading() {
      self.write_bytes(buf);
      return;
    }
    let len = buf.len();
    match self.take(len) {
      Some(start) => buf.copy_from_slice(&self.storage.as_slice()[start..start + len]),
      None => {
        for b in buf.iter_mut() { *b = 0; }
      }
    }
  }
}

impl Default for Stream {
  fn default() -> Self { Self::new() }
}

impl From<Vec<u8>> for Stream {
  #[inline]
  fn from(bytes: Vec<u8>) -> Self { Self::from_vec(bytes) }
}

/// Макрос, генерирующий двунаправленные методы доступа к многобайтовым числам
macro_rules! impl_numbers {
  ($(#[$attr:meta])* fn $name:ident: $ty:ty, $size:expr, $read:ident, $write:ident) => {
    $(#[$attr])*
    pub fn $name(&mut self, value: &mut $ty) {
      if self.is_reading() {
        *value = match self.take($size) {
          Some(start) => LE::$read(&self.storage.as_slice()[start..start + $size]),
          None => 0,
        };
      } else {
        let mut buf = [0u8; $size];
        LE::$write(&mut buf, *value);
        self.write_bytes(&buf);
      }
    }
  }
}

impl Stream {
  /// Читает или записывает 1 байт как беззнаковое число
  pub fn u8(&mut self, value: &mut u8) {
    if self.is_reading() {
      *value = match self.take(1) {
        Some(start) => self.storage.as_slice()[start],
        None => 0,
      };
    } else {
      self.write_bytes(&[*value]);
    }
  }
  /// Читает или записывает 1 байт как число со знаком: байт `0xFF` читается как `-1`
  pub fn i8(&mut self, value: &mut i8) {
    let mut byte = *value as u8;
    self.u8(&mut byte);
    *value = byte as i8;
  }
  impl_numbers!(
    /// Читает или записывает 2 байта в порядке `Little-Endian`
    fn u16: u16, 2, read_u16, write_u16);
  impl_numbers!(
    /// Читает или записывает 4 байта в порядке `Little-Endian`
    fn u32: u32, 4, read_u32, write_u32);
  impl_numbers!(
    /// Читает или записывает 8 байт в порядке `Little-Endian`
    fn u64: u64, 8, read_u64, write_u64);
  impl_numbers!(
    /// Читает или записывает 16 байт в порядке `Little-Endian`
    fn u128: u128, 16, read_u128, write_u128);
  impl_numbers!(
    /// Читает или записывает 2 байта дополнительного кода в порядке `Little-Endian`
    fn i16: i16, 2, read_i16, write_i16);
  impl_numbers!(
    /// Читает или записывает 4 байта дополнительного кода в порядке `Little-Endian`
    fn i32: i32, 4, read_i32, write_i32);
  impl_numbers!(
    /// Читает или записывает 8 байт дополнительного кода в порядке `Little-Endian`
    fn i64: i64, 8, read_i64, write_i64);
  impl_numbers!(
    /// Читает или записывает 16 байт дополнительного кода в порядке `Little-Endian`
    fn i128: i128, 16, read_i128, write_i128);

  /// Читает или записывает число одинарной точности как битовое представление IEEE-754
  /// через [`u32`]. Значение передается бит в бит, включая `NaN` и знак нуля
  ///
  /// [`u32`]: #method.u32
  pub fn f32(&mut self, value: &mut f32) {
    let mut bits = value.to_bits();
    self.u32(&mut bits);
    *value = f32::from_bits(bits);
  }
  /// Читает или записывает число двойной точности как битовое представление IEEE-754
  /// через [`u64`]. Значение передается бит в бит, включая `NaN` и знак нуля
  ///
  /// [`u64`]: #method.u64
  pub fn f64(&mut self, value: &mut f64) {
    let mut bits = value.to_bits();
    self.u64(&mut bits);
    *value = f64::from_bits(bits);
  }
}

////////////////////////////////////////////////////////////////////////////////


#[cfg(test)]
mod bytes {
  use super::{Mode, Stream};
  use error::Error;

  #[test]
  fn test_write_bytes() {
    let mut stream = Stream::with_capacity(10);
    stream.write_bytes(b"a");
    stream.write_bytes(b"bcdefghij");

    assert_eq!(stream.position(), 10);
    assert_eq!(stream.finish().unwrap(), b"abcdefghij");
  }

  #[test]
  fn test_read_bytes() {
    let mut stream = Stream::from_vec(b"ab".to_vec());
    assert_eq!(stream.read_bytes(2), b"ab");
    assert_eq!(stream.position(), 2);
    assert!(stream.error().is_none());
  }

  /// Нехватка данных не сдвигает позицию
  #[test]
  fn test_read_bytes_no_data() {
    let mut stream = Stream::from_vec(b"ab".to_vec());
    assert!(stream.read_bytes(3).is_empty());
    assert_eq!(stream.position(), 0);
    assert_eq!(stream.error(), Some(&Error::Eof { position: 0, needed: 3 }));
  }

  #[test]
  fn test_read_bytes_from_writer() {
    let mut stream = Stream::new();
    stream.write_bytes(b"ab");
    assert!(stream.read_bytes(1).is_empty());
    assert_eq!(stream.error(), Some(&Error::Mode(Mode::Writing)));
  }

  #[test]
  fn test_write_bytes_to_reader() {
    let mut stream = Stream::from_vec(b"ab".to_vec());
    stream.write_bytes(b"c");
    assert_eq!(stream.error(), Some(&Error::Mode(Mode::Reading)));
    assert_eq!(stream.len(), 2);
    assert_eq!(stream.position(), 0);
  }

  #[test]
  fn test_raw() {
    let mut buf = *b"xyz";
    let mut writer = Stream::new();
    writer.raw(&mut buf);

    let mut out = [0u8; 3];
    let mut reader = writer.copy();
    reader.raw(&mut out);
    assert_eq!(&out, b"xyz");

    reader.raw(&mut out);
    assert_eq!(out, [0, 0, 0]);
    assert!(reader.error().unwrap().is_eof());
  }

  /// Запись больше начальной емкости просто увеличивает хранилище
  #[test]
  fn test_growth() {
    let mut stream = Stream::with_capacity(2);
    for i in 0..100u32 {
      let mut value = i;
      stream.u32(&mut value);
    }
    assert_eq!(stream.len(), 400);
    assert_eq!(stream.position(), 400);
    assert_eq!(stream.finish().unwrap().len(), 400);
  }
}


#[cfg(test)]
mod roundtrip {
  use super::Stream;

  macro_rules! roundtrip_test {
    ($name:ident, $method:ident, $type:ty, $bits:expr) => (
      quickcheck! {
        fn $name(test: $type) -> bool {
          let mut writer = Stream::new();
          let mut value = test;
          writer.$method(&mut value);

          let mut reader = writer.copy();
          let mut result: $type = Default::default();
          reader.$method(&mut result);

          reader.error().is_none()
            && reader.remaining() == 0
            && $bits(result) == $bits(test)
        }
      }
    );
  }
  fn same<T>(value: T) -> T { value }

  roundtrip_test!(test_u8,  u8,  u8,  same);
  roundtrip_test!(test_u16, u16, u16, same);
  roundtrip_test!(test_u32, u32, u32, same);
  roundtrip_test!(test_u64, u64, u64, same);
  roundtrip_test!(test_i8,  i8,  i8,  same);
  roundtrip_test!(test_i16, i16, i16, same);
  roundtrip_test!(test_i32, i32, i32, same);
  roundtrip_test!(test_i64, i64, i64, same);
  roundtrip_test!(test_f32, f32, f32, f32::to_bits);
  roundtrip_test!(test_f64, f64, f64, f64::to_bits);

  #[test]
  fn test_float_extremes() {
    let mut writer = Stream::new();
    for &v in &[::std::f32::MAX, ::std::f32::MIN_POSITIVE, -0.0, ::std::f32::NAN, ::std::f32::INFINITY] {
      let mut value = v;
      writer.f32(&mut value);
    }
    let mut big = ::std::f64::MAX;
    writer.f64(&mut big);

    let mut reader = writer.copy();
    for &v in &[::std::f32::MAX, ::std::f32::MIN_POSITIVE, -0.0, ::std::f32::NAN, ::std::f32::INFINITY] {
      let mut value = 0.0f32;
      reader.f32(&mut value);
      assert_eq!(value.to_bits(), v.to_bits());
    }
    let mut value = 0.0f64;
    reader.f64(&mut value);
    assert_eq!(value, ::std::f64::MAX);
    assert!(reader.error().is_none());
  }

  /// Числа с плавающей точкой записываются так же, как их битовое представление
  #[test]
  fn test_float_layout() {
    let mut writer = Stream::new();
    let mut value = 2.5f32;
    writer.f32(&mut value);
    assert_eq!(writer.finish().unwrap(), 2.5f32.to_bits().to_le_bytes());
  }
}

#[cfg(test)]
mod errors {
  use super::Stream;
  use error::Error;

  #[test]
  fn test_short_read() {
    let mut stream = Stream::from_vec(vec![0x01]);
    let mut value = 0xFFFFu16;
    stream.u16(&mut value);

    assert_eq!(value, 0);
    assert_eq!(stream.position(), 0);
    assert_eq!(stream.error(), Some(&Error::Eof { position: 0, needed: 2 }));
  }

  /// После ошибки никакие вызовы не меняют ни позицию, ни ошибку, а поля обнуляются
  #[test]
  fn test_sticky() {
    let mut stream = Stream::from_vec(vec![0x01, 0x02, 0x03]);
    let mut word = 0u16;
    let mut dword = 0u32;
    stream.u16(&mut word);
    stream.u32(&mut dword);
    assert_eq!(word, 0x0201);
    assert_eq!(stream.position(), 2);
    let error = stream.error().cloned();
    assert_eq!(error, Some(Error::Eof { position: 2, needed: 4 }));

    // Этот байт есть в потоке, но после ошибки он уже не читается
    let mut byte = 0xAAu8;
    let mut float = 1.5f64;
    let mut signed = -7i8;
    stream.u8(&mut byte);
    stream.f64(&mut float);
    stream.i8(&mut signed);
    assert!(stream.read_bytes(1).is_empty());

    assert_eq!((byte, float, signed), (0, 0.0, 0));
    assert_eq!(stream.position(), 2);
    assert_eq!(stream.error().cloned(), error);
    assert_eq!(stream.bytes(), Err(Error::Eof { position: 2, needed: 4 }));
  }

  #[test]
  fn test_into_parts() {
    let mut stream = Stream::from_vec(vec![0x01]);
    let mut value = 0u64;
    stream.u64(&mut value);

    let (bytes, error) = stream.into_parts();
    assert_eq!(bytes, [0x01]);
    assert!(error.unwrap().is_eof());
  }

  /// Поле записи в потоке с ошибкой не меняется
  #[test]
  fn test_sticky_writer() {
    let mut stream = Stream::new();
    stream.read_bytes(1);

    let mut value = 5u32;
    stream.u32(&mut value);
    assert_eq!(value, 5);
    assert_eq!(stream.len(), 0);
    assert!(stream.finish().is_err());
  }
}

#[cfg(test)]
mod cursor {
  use super::{Mode, Stream};

  /// Копия не зависит от дальнейшей записи в исходный поток
  #[test]
  fn test_copy_independence() {
    let mut writer = Stream::new();
    writer.write_bytes(b"abcdefghij");

    let mut copy = writer.copy();
    assert_eq!(copy.mode(), Mode::Reading);
    assert_eq!(copy.len(), writer.len());

    writer.reset_position();
    writer.write_bytes(b"XYZ");
    writer.write_bytes(b"tail");

    assert_eq!(copy.read_bytes(10), b"abcdefghij");
    assert!(copy.error().is_none());
    assert_eq!(writer.finish().unwrap(), b"XYZtailhij");
  }

  /// Копия потока чтения начинает с начала, независимо от позиции исходного потока
  #[test]
  fn test_copy_reader() {
    let mut reader = Stream::from_vec(vec![1, 2]);
    let mut value = 0u8;
    reader.u8(&mut value);

    let mut copy = reader.copy();
    assert_eq!(copy.position(), 0);
    copy.u8(&mut value);
    assert_eq!(value, 1);
  }

  /// Заголовок с длиной заполняется после записи тела сообщения
  #[test]
  fn test_header_placeholder() {
    let mut writer = Stream::new();
    let mut len = 0u16;
    writer.u16(&mut len);
    writer.write_bytes(b"body");

    len = writer.len() as u16 - 2;
    writer.reset_position();
    writer.u16(&mut len);

    assert_eq!(writer.position(), 2);
    assert_eq!(writer.len(), 6);
    assert_eq!(writer.finish().unwrap(), [0x04, 0x00, b'b', b'o', b'd', b'y']);
  }

  #[test]
  fn test_reset_reader() {
    let mut reader = Stream::from_vec(vec![0xCD, 0xAB]);
    let mut first = 0u16;
    let mut second = 0u16;
    reader.u16(&mut first);
    assert_eq!(reader.remaining(), 0);
    reader.reset_position();
    reader.u16(&mut second);
    assert_eq!((first, second), (0xABCD, 0xABCD));
    assert_eq!(reader.mode(), Mode::Reading);
  }

  /// Одна и та же последовательность вызовов и пишет, и читает сообщение
  #[test]
  fn test_symmetry() {
    fn fields(stream: &mut Stream, tag: &mut u8, value: &mut f32) {
      stream.u8(tag);
      stream.f32(value);
    }

    let mut writer = Stream::new();
    fields(&mut writer, &mut 7, &mut 2.5);

    let mut reader = writer.copy();
    let (mut tag, mut value) = (0, 0.0);
    fields(&mut reader, &mut tag, &mut value);

    assert!(reader.error().is_none());
    assert_eq!((tag, value), (7, 2.5));
  }
}
