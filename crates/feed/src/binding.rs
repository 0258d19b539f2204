// ABOUTME: Declarative binding tables mapping entity fields onto XML attributes, elements and text.
// ABOUTME: The decoder and encoder both walk these tables, so wire names live in exactly one place.

use quick_xml::events::BytesStart;

use crate::decode::Decoder;
use crate::encode::Encoder;
use crate::error::{DecodeError, EncodeError, ValueError};
use crate::namespace::{Namespace, QualifiedName};

/// Where a field lives relative to its entity's element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Attribute,
    Element,
    CharData,
}

/// How many times a field may occur. Derived from the field's Rust type:
/// `T` is required, `Option<T>` optional, `Vec<T>` repeated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    Required,
    Optional,
    Repeated,
}

/// How text is written. Literal text goes out as a CDATA section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextWrap {
    Plain,
    Literal,
}

/// A schema type with a binding table.
pub trait Entity: Default + 'static {
    /// Element name used in diagnostics.
    const NAME: &'static str;

    /// Field bindings in canonical encoding order.
    fn bindings() -> &'static [Binding<Self>];
}

pub type DecodeChildFn<T> =
    fn(&mut T, &mut Decoder<'_>, &BytesStart<'_>, bool) -> Result<(), DecodeError>;
pub type EncodeChildFn<T> = fn(&T, &mut Encoder, &str) -> Result<(), EncodeError>;

/// How a binding reaches into its entity.
pub enum Access<T: 'static> {
    /// A value converted to and from text.
    Scalar {
        read: fn(&T) -> Vec<String>,
        write: fn(&mut T, &str) -> bool,
    },
    /// A nested entity with its own table.
    Child {
        decode: DecodeChildFn<T>,
        encode: EncodeChildFn<T>,
        present: fn(&T) -> bool,
    },
    /// Another entity whose whole table is unioned into this one.
    Embed(Embedded<T>),
}

/// Entry points into an embedded entity's table.
pub struct Embedded<T: 'static> {
    pub bind_attribute: fn(&mut T, &str, &str) -> Result<bool, ValueError>,
    pub bind_child: fn(
        &mut T,
        &mut Decoder<'_>,
        &QualifiedName<'_>,
        &BytesStart<'_>,
        bool,
    ) -> Result<bool, DecodeError>,
    pub collect_attributes: fn(&T, &mut Vec<AttributeValue>),
    pub write_body: fn(&T, &mut Encoder) -> Result<(), EncodeError>,
    pub has_body: fn(&T) -> bool,
}

/// One row of a binding table.
pub struct Binding<T: 'static> {
    pub name: &'static str,
    pub namespace: Option<Namespace>,
    pub placement: Placement,
    pub cardinality: Cardinality,
    pub wrap: TextWrap,
    pub access: Access<T>,
}

impl<T: 'static> Binding<T> {
    pub fn scalar(
        name: &'static str,
        namespace: Option<Namespace>,
        placement: Placement,
        wrap: TextWrap,
        cardinality: Cardinality,
        read: fn(&T) -> Vec<String>,
        write: fn(&mut T, &str) -> bool,
    ) -> Self {
        Self {
            name,
            namespace,
            placement,
            cardinality,
            wrap,
            access: Access::Scalar { read, write },
        }
    }

    pub fn child(
        name: &'static str,
        namespace: Namespace,
        cardinality: Cardinality,
        decode: DecodeChildFn<T>,
        encode: EncodeChildFn<T>,
        present: fn(&T) -> bool,
    ) -> Self {
        Self {
            name,
            namespace: Some(namespace),
            placement: Placement::Element,
            cardinality,
            wrap: TextWrap::Plain,
            access: Access::Child {
                decode,
                encode,
                present,
            },
        }
    }

    pub fn embed(name: &'static str, embedded: Embedded<T>) -> Self {
        Self {
            name,
            namespace: None,
            placement: Placement::Element,
            cardinality: Cardinality::Required,
            wrap: TextWrap::Plain,
            access: Access::Embed(embedded),
        }
    }

    /// True when this binding is the element `local` in `namespace`.
    pub fn matches_element(&self, namespace: Namespace, local: &str) -> bool {
        self.placement == Placement::Element
            && self.namespace == Some(namespace)
            && self.name == local
    }

    /// The element name as the encoder writes it.
    pub fn tag(&self) -> std::borrow::Cow<'static, str> {
        self.namespace.unwrap_or(Namespace::Rss).qualify(self.name)
    }
}

/// An attribute gathered for writing, with the names needed for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeValue {
    pub entity: &'static str,
    pub name: &'static str,
    pub value: String,
}

/// Conversion between a field value and its XML text.
pub trait XmlScalar: Sized {
    /// Whether whitespace-only text means the value is absent. Strings keep
    /// blank text as an empty value.
    const BLANK_IS_ABSENT: bool = true;

    fn parse_xml(raw: &str) -> Option<Self>;
    fn to_xml(&self) -> String;
}

impl XmlScalar for String {
    const BLANK_IS_ABSENT: bool = false;

    fn parse_xml(raw: &str) -> Option<Self> {
        Some(raw.to_owned())
    }

    fn to_xml(&self) -> String {
        self.clone()
    }
}

macro_rules! numeric_scalar {
    ($($t:ty),* $(,)?) => {
        $(
            impl XmlScalar for $t {
                fn parse_xml(raw: &str) -> Option<Self> {
                    raw.trim().parse().ok()
                }

                fn to_xml(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

numeric_scalar!(u16, u32, u64, f64);

impl XmlScalar for bool {
    fn parse_xml(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "explicit" | "1" => Some(true),
            "false" | "no" | "clean" | "0" => Some(false),
            _ => None,
        }
    }

    fn to_xml(&self) -> String {
        self.to_string()
    }
}

/// A field that holds zero, one or many scalars.
pub trait ScalarSlot {
    const CARDINALITY: Cardinality;

    /// Text for every occurrence to emit.
    fn render(&self) -> Vec<String>;

    /// Stores one decoded occurrence. Returns false when `raw` does not parse.
    fn assign(&mut self, raw: &str) -> bool;
}

fn is_blank<S: XmlScalar>(raw: &str) -> bool {
    S::BLANK_IS_ABSENT && raw.trim().is_empty()
}

impl<S: XmlScalar> ScalarSlot for Option<S> {
    const CARDINALITY: Cardinality = Cardinality::Optional;

    fn render(&self) -> Vec<String> {
        self.iter().map(XmlScalar::to_xml).collect()
    }

    fn assign(&mut self, raw: &str) -> bool {
        if is_blank::<S>(raw) {
            *self = None;
            return true;
        }
        match S::parse_xml(raw) {
            Some(value) => {
                *self = Some(value);
                true
            }
            None => false,
        }
    }
}

impl<S: XmlScalar> ScalarSlot for Vec<S> {
    const CARDINALITY: Cardinality = Cardinality::Repeated;

    fn render(&self) -> Vec<String> {
        self.iter().map(XmlScalar::to_xml).collect()
    }

    fn assign(&mut self, raw: &str) -> bool {
        if is_blank::<S>(raw) {
            return true;
        }
        match S::parse_xml(raw) {
            Some(value) => {
                self.push(value);
                true
            }
            None => false,
        }
    }
}

/// Implements `ScalarSlot` for bare (required) scalar fields.
macro_rules! required_scalar {
    ($($t:ty),* $(,)?) => {
        $(
            impl $crate::binding::ScalarSlot for $t {
                const CARDINALITY: $crate::binding::Cardinality =
                    $crate::binding::Cardinality::Required;

                fn render(&self) -> Vec<String> {
                    vec![$crate::binding::XmlScalar::to_xml(self)]
                }

                fn assign(&mut self, raw: &str) -> bool {
                    if <$t as $crate::binding::XmlScalar>::BLANK_IS_ABSENT && raw.trim().is_empty() {
                        *self = Default::default();
                        return true;
                    }
                    match <$t as $crate::binding::XmlScalar>::parse_xml(raw) {
                        Some(value) => {
                            *self = value;
                            true
                        }
                        None => false,
                    }
                }
            }
        )*
    };
}
pub(crate) use required_scalar;

required_scalar!(String, u16, u32, u64, f64, bool);

pub fn scalar_cardinality<S: ScalarSlot>(_: &S) -> Cardinality {
    S::CARDINALITY
}

/// A field that holds optional or repeated nested entities.
pub trait ChildSlot {
    type Item: Entity;
    const CARDINALITY: Cardinality;

    fn put(&mut self, item: Self::Item);
    fn items(&self) -> &[Self::Item];
}

impl<E: Entity> ChildSlot for Option<E> {
    type Item = E;
    const CARDINALITY: Cardinality = Cardinality::Optional;

    fn put(&mut self, item: E) {
        *self = Some(item);
    }

    fn items(&self) -> &[E] {
        self.as_ref().map(std::slice::from_ref).unwrap_or(&[])
    }
}

impl<E: Entity> ChildSlot for Vec<E> {
    type Item = E;
    const CARDINALITY: Cardinality = Cardinality::Repeated;

    fn put(&mut self, item: E) {
        self.push(item);
    }

    fn items(&self) -> &[E] {
        self.as_slice()
    }
}

pub fn child_cardinality<S: ChildSlot>(_: &S) -> Cardinality {
    S::CARDINALITY
}

pub fn decode_child<S: ChildSlot>(
    slot: &mut S,
    decoder: &mut Decoder<'_>,
    start: &BytesStart<'_>,
    empty: bool,
) -> Result<(), DecodeError> {
    let item = decoder.read_entity::<S::Item>(start, empty)?;
    slot.put(item);
    Ok(())
}

pub fn encode_child<S: ChildSlot>(
    slot: &S,
    encoder: &mut Encoder,
    tag: &str,
) -> Result<(), EncodeError> {
    for item in slot.items() {
        encoder.write_entity(item, tag)?;
    }
    Ok(())
}

pub fn decode_required<E: Entity>(
    slot: &mut E,
    decoder: &mut Decoder<'_>,
    start: &BytesStart<'_>,
    empty: bool,
) -> Result<(), DecodeError> {
    *slot = decoder.read_entity::<E>(start, empty)?;
    Ok(())
}

pub fn encode_required<E: Entity>(
    slot: &E,
    encoder: &mut Encoder,
    tag: &str,
) -> Result<(), EncodeError> {
    encoder.write_entity(slot, tag)
}

/// Applies an unqualified attribute to `value`. Returns false when no
/// binding claims the name.
pub fn bind_attribute<E: Entity>(value: &mut E, name: &str, raw: &str) -> Result<bool, ValueError> {
    for binding in E::bindings() {
        match &binding.access {
            Access::Scalar { write, .. }
                if binding.placement == Placement::Attribute && binding.name == name =>
            {
                if write(value, raw) {
                    return Ok(true);
                }
                return Err(ValueError {
                    entity: E::NAME,
                    field: binding.name,
                    value: raw.to_owned(),
                });
            }
            Access::Embed(embedded) => {
                if (embedded.bind_attribute)(value, name, raw)? {
                    return Ok(true);
                }
            }
            _ => {}
        }
    }
    Ok(false)
}

/// Applies accumulated character data to `value`. Entities without a
/// character-data binding ignore it.
pub fn bind_text<E: Entity>(value: &mut E, text: &str) -> Result<(), ValueError> {
    for binding in E::bindings() {
        if let Access::Scalar { write, .. } = &binding.access {
            if binding.placement == Placement::CharData {
                if write(value, text) {
                    return Ok(());
                }
                return Err(ValueError {
                    entity: E::NAME,
                    field: binding.name,
                    value: text.to_owned(),
                });
            }
        }
    }
    Ok(())
}

/// Gathers every attribute `value` emits, embedded tables included.
pub fn collect_attributes<E: Entity>(value: &E, out: &mut Vec<AttributeValue>) {
    for binding in E::bindings() {
        match &binding.access {
            Access::Scalar { read, .. } if binding.placement == Placement::Attribute => {
                out.extend(read(value).into_iter().map(|text| AttributeValue {
                    entity: E::NAME,
                    name: binding.name,
                    value: text,
                }));
            }
            Access::Embed(embedded) => (embedded.collect_attributes)(value, out),
            _ => {}
        }
    }
}

/// True when `value` emits any child element or character data.
pub fn has_body<E: Entity>(value: &E) -> bool {
    E::bindings().iter().any(|binding| match &binding.access {
        Access::Scalar { read, .. } => {
            binding.placement != Placement::Attribute && !read(value).is_empty()
        }
        Access::Child { present, .. } => present(value),
        Access::Embed(embedded) => (embedded.has_body)(value),
    })
}

/// Declares an entity's binding table.
///
/// Each row is `kind [Namespace] ["name"] => field`, where kind is one of
/// `attr`, `text`, `element`, `cdata` (literal element), `child`, `required`
/// (always-present child) or `embed`.
macro_rules! entity {
    ($ty:ty as $tag:literal {
        $($kind:ident $($ns:ident)? $($name:literal)? => $field:ident),* $(,)?
    }) => {
        impl $crate::binding::Entity for $ty {
            const NAME: &'static str = $tag;

            fn bindings() -> &'static [$crate::binding::Binding<Self>] {
                static BINDINGS: ::once_cell::sync::Lazy<Vec<$crate::binding::Binding<$ty>>> =
                    ::once_cell::sync::Lazy::new(|| {
                        vec![$($crate::binding::field_binding!(
                            $kind, $ty, [$($ns)?], [$($name)?], $field
                        )),*]
                    });
                &BINDINGS
            }
        }
    };
}
pub(crate) use entity;

macro_rules! field_binding {
    (attr, $ty:ty, [], [$name:literal], $field:ident) => {
        $crate::binding::Binding::<$ty>::scalar(
            $name,
            None,
            $crate::binding::Placement::Attribute,
            $crate::binding::TextWrap::Plain,
            $crate::binding::scalar_cardinality(&<$ty as Default>::default().$field),
            |t| $crate::binding::ScalarSlot::render(&t.$field),
            |t, raw| $crate::binding::ScalarSlot::assign(&mut t.$field, raw),
        )
    };
    (text, $ty:ty, [], [], $field:ident) => {
        $crate::binding::Binding::<$ty>::scalar(
            stringify!($field),
            None,
            $crate::binding::Placement::CharData,
            $crate::binding::TextWrap::Plain,
            $crate::binding::scalar_cardinality(&<$ty as Default>::default().$field),
            |t| $crate::binding::ScalarSlot::render(&t.$field),
            |t, raw| $crate::binding::ScalarSlot::assign(&mut t.$field, raw),
        )
    };
    (element, $ty:ty, [$ns:ident], [$name:literal], $field:ident) => {
        $crate::binding::Binding::<$ty>::scalar(
            $name,
            Some($crate::namespace::Namespace::$ns),
            $crate::binding::Placement::Element,
            $crate::binding::TextWrap::Plain,
            $crate::binding::scalar_cardinality(&<$ty as Default>::default().$field),
            |t| $crate::binding::ScalarSlot::render(&t.$field),
            |t, raw| $crate::binding::ScalarSlot::assign(&mut t.$field, raw),
        )
    };
    (cdata, $ty:ty, [$ns:ident], [$name:literal], $field:ident) => {
        $crate::binding::Binding::<$ty>::scalar(
            $name,
            Some($crate::namespace::Namespace::$ns),
            $crate::binding::Placement::Element,
            $crate::binding::TextWrap::Literal,
            $crate::binding::scalar_cardinality(&<$ty as Default>::default().$field),
            |t| $crate::binding::ScalarSlot::render(&t.$field),
            |t, raw| $crate::binding::ScalarSlot::assign(&mut t.$field, raw),
        )
    };
    (child, $ty:ty, [$ns:ident], [$name:literal], $field:ident) => {
        $crate::binding::Binding::<$ty>::child(
            $name,
            $crate::namespace::Namespace::$ns,
            $crate::binding::child_cardinality(&<$ty as Default>::default().$field),
            |t, decoder, start, empty| {
                $crate::binding::decode_child(&mut t.$field, decoder, start, empty)
            },
            |t, encoder, tag| $crate::binding::encode_child(&t.$field, encoder, tag),
            |t| !$crate::binding::ChildSlot::items(&t.$field).is_empty(),
        )
    };
    (required, $ty:ty, [$ns:ident], [$name:literal], $field:ident) => {
        $crate::binding::Binding::<$ty>::child(
            $name,
            $crate::namespace::Namespace::$ns,
            $crate::binding::Cardinality::Required,
            |t, decoder, start, empty| {
                $crate::binding::decode_required(&mut t.$field, decoder, start, empty)
            },
            |t, encoder, tag| $crate::binding::encode_required(&t.$field, encoder, tag),
            |_| true,
        )
    };
    (embed, $ty:ty, [], [], $field:ident) => {
        $crate::binding::Binding::<$ty>::embed(
            stringify!($field),
            $crate::binding::Embedded {
                bind_attribute: |t, name, raw| {
                    $crate::binding::bind_attribute(&mut t.$field, name, raw)
                },
                bind_child: |t, decoder, name, start, empty| {
                    decoder.bind_child(&mut t.$field, name, start, empty)
                },
                collect_attributes: |t, out| $crate::binding::collect_attributes(&t.$field, out),
                write_body: |t, encoder| encoder.write_body(&t.$field),
                has_body: |t| $crate::binding::has_body(&t.$field),
            },
        )
    };
}
pub(crate) use field_binding;
