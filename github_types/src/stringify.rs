//! Human readable rendering of resources for logs and debugging.
//!
//! This is not a wire format. Unset optionals and empty collections are skipped, set optionals are
//! rendered through to their value, and nested resources are rendered recursively:
//!
//! ```text
//! Repository{id:1296269, name:"Hello-World", owner:User{login:"octocat"}}
//! ```

use std::collections::BTreeMap;
use std::fmt;

/// Structural visitor implemented by every resource type.
///
/// Resource structs get their implementation from [`impl_stringify!`](crate::impl_stringify).
pub trait Stringify {
    fn write_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;

    /// Absent values are skipped when they appear as a struct field.
    fn is_absent(&self) -> bool {
        false
    }
}

/// Renders `value` into a new string.
pub fn stringify<T: Stringify + ?Sized>(value: &T) -> String {
    Stringified(value).to_string()
}

struct Stringified<'a, T: ?Sized>(&'a T);

impl<T: Stringify + ?Sized> fmt::Display for Stringified<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.write_value(f)
    }
}

/// Writes `Name{field:value, ...}`, skipping absent fields.
pub struct StructWriter<'a, 'f> {
    f: &'a mut fmt::Formatter<'f>,
    empty: bool,
}

impl<'a, 'f> StructWriter<'a, 'f> {
    pub fn new(f: &'a mut fmt::Formatter<'f>, name: &str) -> Result<Self, fmt::Error> {
        write!(f, "{}{{", name)?;
        Ok(StructWriter { f, empty: true })
    }

    pub fn field(&mut self, name: &str, value: &dyn Stringify) -> fmt::Result {
        if value.is_absent() {
            return Ok(());
        }
        if !self.empty {
            self.f.write_str(", ")?;
        }
        self.empty = false;
        // A trailing `_` only dodges keywords such as `type`.
        write!(self.f, "{}:", name.trim_end_matches('_'))?;
        value.write_value(self.f)
    }

    pub fn finish(self) -> fmt::Result {
        self.f.write_str("}")
    }
}

/// Implements [`Stringify`] and `Display` for a resource struct from its field list.
#[macro_export]
macro_rules! impl_stringify {
    ($($ty:ident { $($field:ident),* $(,)? })*) => {$(
        impl $crate::stringify::Stringify for $ty {
            fn write_value(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                let mut writer = $crate::stringify::StructWriter::new(f, stringify!($ty))?;
                $( writer.field(stringify!($field), &self.$field)?; )*
                writer.finish()
            }
        }

        impl ::std::fmt::Display for $ty {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                $crate::stringify::Stringify::write_value(self, f)
            }
        }
    )*};
}

macro_rules! display_stringify {
    ($($ty:ty),*) => {$(
        impl Stringify for $ty {
            fn write_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self)
            }
        }
    )*};
}

display_stringify!(bool, u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, f32, f64);

impl Stringify for str {
    fn write_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl Stringify for String {
    fn write_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_str().write_value(f)
    }
}

impl Stringify for serde_json::Value {
    fn write_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl<T: Stringify> Stringify for Option<T> {
    fn write_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Some(value) => value.write_value(f),
            None => f.write_str("<nil>"),
        }
    }

    fn is_absent(&self) -> bool {
        self.is_none()
    }
}

impl<T: Stringify + ?Sized> Stringify for Box<T> {
    fn write_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (**self).write_value(f)
    }

    fn is_absent(&self) -> bool {
        (**self).is_absent()
    }
}

impl<T: Stringify> Stringify for Vec<T> {
    fn write_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, item) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            item.write_value(f)?;
        }
        f.write_str("]")
    }

    fn is_absent(&self) -> bool {
        self.is_empty()
    }
}

impl<T: Stringify> Stringify for BTreeMap<String, T> {
    fn write_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("map[")?;
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}:", key)?;
            value.write_value(f)?;
        }
        f.write_str("]")
    }

    fn is_absent(&self) -> bool {
        self.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Inner {
        name: Option<String>,
    }

    struct Outer {
        id: Option<u64>,
        flag: Option<bool>,
        inner: Option<Inner>,
        items: Vec<Inner>,
        type_: Option<String>,
    }

    impl_stringify! {
        Inner { name }
        Outer { id, flag, inner, items, type_ }
    }

    fn inner(name: &str) -> Inner {
        Inner {
            name: Some(name.to_string()),
        }
    }

    #[test]
    fn unset_fields_are_skipped() {
        let value = Outer {
            id: None,
            flag: None,
            inner: None,
            items: vec![],
            type_: None,
        };
        assert_eq!(stringify(&value), "Outer{}");
    }

    #[test]
    fn set_zero_values_are_rendered() {
        let value = Outer {
            id: Some(0),
            flag: Some(false),
            inner: None,
            items: vec![],
            type_: Some(String::new()),
        };
        assert_eq!(stringify(&value), r#"Outer{id:0, flag:false, type:""}"#);
    }

    #[test]
    fn nested_structs_and_sequences() {
        let value = Outer {
            id: Some(7),
            flag: None,
            inner: Some(inner("a")),
            items: vec![inner("b"), Inner { name: None }],
            type_: None,
        };
        assert_eq!(
            value.to_string(),
            r#"Outer{id:7, inner:Inner{name:"a"}, items:[Inner{name:"b"} Inner{}]}"#
        );
    }

    #[test]
    fn maps_render_sorted() {
        let mut map = BTreeMap::new();
        map.insert("b".to_string(), 2u32);
        map.insert("a".to_string(), 1u32);
        assert_eq!(stringify(&map), "map[a:1 b:2]");
    }

    #[test]
    fn bare_none_renders_nil() {
        assert_eq!(stringify(&None::<u32>), "<nil>");
    }
}
