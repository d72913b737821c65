use zbus::zvariant::{OwnedValue, Structure, Value};

/// An RGB color with channels in `0.0..=1.0`, sent on the bus as `(ddd)`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Color {
    /// Red channel
    pub red: f64,
    /// Green channel
    pub green: f64,
    /// Blue channel
    pub blue: f64,
}

impl Color {
    /// Creates a color from explicit channels.
    pub fn new(red: f64, green: f64, blue: f64) -> Self {
        Self { red, green, blue }
    }

    /// Builds a color from up to three channels; missing ones are `0.0`.
    ///
    /// Extra channels are ignored.
    pub fn from_channels(channels: &[f64]) -> Self {
        let channel = |i: usize| channels.get(i).copied().unwrap_or(0.0);
        Self::new(channel(0), channel(1), channel(2))
    }
}

/// The payload of a setting.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    /// UTF-8 text, sent as `s`
    String(String),
    /// Signed 32-bit integer, sent as `i`
    Integer(i32),
    /// RGB color, sent as `(ddd)`
    Color(Color),
}

impl SettingValue {
    /// Converts the payload into a D-Bus variant body.
    pub fn to_value(&self) -> Value<'static> {
        match self {
            SettingValue::String(text) => Value::from(text.clone()),
            SettingValue::Integer(number) => Value::from(*number),
            SettingValue::Color(color) => {
                Value::from(Structure::from((color.red, color.green, color.blue)))
            }
        }
    }

    /// Converts the payload into an owned D-Bus variant.
    ///
    /// # Errors
    /// Returns a `zvariant` error if the value cannot be owned, which only
    /// happens for file descriptors and therefore never for settings.
    pub fn to_owned_value(&self) -> zbus::zvariant::Result<OwnedValue> {
        OwnedValue::try_from(self.to_value())
    }
}

/// A setting identified by its namespace and key.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedValue {
    namespace: String,
    key: String,
    value: SettingValue,
}

impl TypedValue {
    /// Creates a setting; namespace and key must be non-empty.
    pub fn new(
        namespace: impl Into<String>,
        key: impl Into<String>,
        value: SettingValue,
    ) -> Option<Self> {
        let namespace = namespace.into();
        let key = key.into();

        if namespace.is_empty() || key.is_empty() {
            return None;
        }

        Some(Self {
            namespace,
            key,
            value,
        })
    }

    /// Namespace the setting belongs to.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Key within the namespace.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The payload.
    pub fn value(&self) -> &SettingValue {
        &self.value
    }
}
