use std::rc::Rc;

use crate::serialization::*;

pub trait Serializable: core::fmt::Debug {
    fn read(sr: &mut SerializationReader) -> SerializationResult<Self> where Self: Sized;
    fn write(&self, sw: &mut SerializationWriter);
}
impl Serializable for String {
    fn read(sr: &mut SerializationReader) -> SerializationResult<Self> {
        let len = usize::read(sr)?;
        let bytes = sr.read_slice(len)?.to_vec();
        Ok(String::from_utf8(bytes)?)
    }

    fn write(&self, sw: &mut SerializationWriter) {
        let bytes = self.as_bytes();
        sw.write(&(bytes.len() as u64));
        sw.write_raw_bytes(bytes);
    }
}


macro_rules! impl_for_num {
    ($($t:ty),+) => { $(
        impl Serializable for $t {
            fn read(sr: &mut SerializationReader) -> SerializationResult<Self> {
                let mut bytes = [0u8; std::mem::size_of::<$t>()];
                bytes.copy_from_slice(sr.read_slice(std::mem::size_of::<$t>())?);
                Ok(Self::from_le_bytes(bytes))
            }

            fn write(&self, sw: &mut SerializationWriter) {
                sw.write_raw_bytes(&self.to_le_bytes())
            }
        } )+
    }
}
impl_for_num![u8, i8, u16, i16, u32, i32, u64, i64, f32, f64];

// usize is read as a u64
impl Serializable for usize {
    fn read(sr: &mut SerializationReader) -> SerializationResult<Self> {
        u64::read(sr).map(|n| n as usize)
    }

    fn write(&self, sw: &mut SerializationWriter) {
        (*self as u64).write(sw)
    }
}
impl Serializable for bool {
    fn read(sr: &mut SerializationReader) -> SerializationResult<Self> {
        Ok(u8::read(sr)? & 1 == 1)
    }

    fn write(&self, sw: &mut SerializationWriter) {
        sw.write::<u8>(&if *self {1} else {0});
    }
}

// serialization for tuples
impl<T:Serializable, T2:Serializable> Serializable for (T, T2) {
    fn read(sr: &mut SerializationReader) -> SerializationResult<Self> {
        Ok((T::read(sr)?, T2::read(sr)?))
    }

    fn write(&self, sw: &mut SerializationWriter) {
        sw.write(&self.0);
        sw.write(&self.1);
    }
}

// serialization for vecs
impl<T:Serializable> Serializable for Vec<T> {
    fn read(sr: &mut SerializationReader) -> SerializationResult<Self> {
        let count = usize::read(sr)?;
        let mut out:Vec<T> = Vec::with_capacity(count.min(1024));
        for n in 0..count { out.push(sr.read(format!("Vec item #{n}"))?) }
        Ok(out)
    }

    fn write(&self, sw: &mut SerializationWriter) {
        sw.write(&self.len());

        for i in self.iter() {
            sw.write(i)
        }
    }
}

// serialization for options
impl<T:Serializable> Serializable for Option<T> {
    fn read(sr: &mut SerializationReader) -> SerializationResult<Self> {
        if bool::read(sr)? {
            Ok(Some(T::read(sr)?))
        } else {
            Ok(None)
        }
    }

    fn write(&self, sw: &mut SerializationWriter) {
        sw.write(&self.is_some());
        if let Some(t) = self { sw.write(t) }
    }
}


// implement for wrapper types
macro_rules! impl_wrapper {
    ($($t:ident),+) => {
        $(impl<T:Serializable> Serializable for $t<T> {
            fn read(sr: &mut SerializationReader) -> SerializationResult<Self> {
                Ok(Self::new(T::read(sr)?))
            }

            fn write(&self, sw: &mut SerializationWriter) {
                self.as_ref().write(sw)
            }
        })+
    };
}
impl_wrapper!(Box, Rc);


#[derive(Default, Clone, Debug)]
pub struct StackData {
    pub depth: usize,
    pub name: String,
    pub entries: Vec<String>,
}
