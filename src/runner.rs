//! Form data runner
//!
//! A Runner reads one instance document against a Builder's control
//! catalog. Every value is located and decoded once, at construction:
//! - raw values: control name → text of the matching element
//! - values: control name → decode outcome
//!
//! Controls with no matching element get no entry in either table; they
//! read back as `None`. Malformed literals are kept as errors and only
//! surface when the value is asked for.

use std::sync::Arc;

use roxmltree::{Document, Node};
use rustc_hash::FxHashMap;
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::binding::Control;
use crate::builder::Builder;
use crate::config::FormConfig;
use crate::error::{DecodeError, FormError, Result};
use crate::value::FormValue;
use crate::xml;

/// Returned by `RunnerForm::get` for keys that match no control
static NOT_FOUND: FormValue = FormValue::Boolean(false);

#[derive(Debug, Clone)]
pub struct Runner {
    builder: Arc<Builder>,
    raw_values: FxHashMap<String, Option<String>>,
    values: FxHashMap<String, std::result::Result<Option<FormValue>, DecodeError>>,
}

impl Runner {
    /// Start configuring a runner over an instance document
    pub fn options(xml: &[u8]) -> RunnerOptions<'_> {
        RunnerOptions::new(xml)
    }

    /// Runner over a shared, already built definition
    pub fn with_builder(xml: &[u8], builder: Arc<Builder>) -> Result<Self> {
        Self::options(xml).builder(builder).build()
    }

    /// Runner that parses its own definition
    pub fn from_definition(xml: &[u8], builder_xml: &[u8], lang: &str) -> Result<Self> {
        Self::options(xml).builder_xml(builder_xml).lang(lang).build()
    }

    #[instrument(skip_all, fields(controls = builder.controls().len()))]
    fn new(xml: &[u8], builder: Arc<Builder>) -> Result<Self> {
        let doc = xml::parse(xml)?;

        let mut runner = Self {
            builder,
            raw_values: FxHashMap::default(),
            values: FxHashMap::default(),
        };
        runner.set_values(&doc);

        debug!(resolved = runner.values.len(), "instance values resolved");
        Ok(runner)
    }

    fn set_values(&mut self, doc: &Document) {
        let builder = Arc::clone(&self.builder);
        let form_element = &builder.config().form_element;

        for (name, control) in builder.controls() {
            if let Some(element) = get_form_element(doc, control, form_element) {
                self.raw_values
                    .insert(name.clone(), element.text().map(str::to_string));
                self.values
                    .insert(name.clone(), control.decode_form_element(element));
            }
        }
    }

    pub fn builder(&self) -> &Builder {
        &self.builder
    }

    /// Shared handle to the builder, for building more runners
    pub fn shared_builder(&self) -> Arc<Builder> {
        Arc::clone(&self.builder)
    }

    fn ensure_known(&self, name: &str) -> Result<()> {
        if self.builder.control(name).is_some() {
            Ok(())
        } else {
            Err(FormError::ControlNotFound {
                name: name.to_string(),
            })
        }
    }

    /// Decoded value of a control
    ///
    /// `Ok(None)` when this instance has no value for the control;
    /// `ControlNotFound` when the form defines no such control.
    pub fn get_value(&self, name: &str) -> Result<Option<&FormValue>> {
        self.ensure_known(name)?;
        match self.values.get(name) {
            None => Ok(None),
            Some(Ok(value)) => Ok(value.as_ref()),
            Some(Err(e)) => Err(FormError::decode(name, e.clone())),
        }
    }

    /// Text of a control's element, as found in the instance
    pub fn get_raw_value(&self, name: &str) -> Result<Option<&str>> {
        self.ensure_known(name)?;
        Ok(self.raw_values.get(name).and_then(|v| v.as_deref()))
    }

    /// True when the instance has an element for the control
    pub fn has_value(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Writing values back into the instance is not supported; this is a no-op.
    pub fn set_value(&self, name: &str, value: FormValue) {
        debug!(control = name, value = %value, "set_value ignored: runner is read-only");
    }

    /// Read-only access by sanitized control name
    pub fn form(&self) -> RunnerForm<'_> {
        RunnerForm { runner: self }
    }

    /// JSON object of every value found in the instance
    ///
    /// Malformed literals are reported as their raw text.
    pub fn to_value(&self) -> Value {
        let values: Map<String, Value> = self
            .values
            .iter()
            .map(|(name, outcome)| {
                let value = match outcome {
                    Ok(Some(v)) => serde_json::to_value(v).unwrap_or(Value::Null),
                    Ok(None) => Value::Null,
                    Err(e) => Value::String(e.literal.clone()),
                };
                (name.clone(), value)
            })
            .collect();
        Value::Object(values)
    }
}

/// Element holding a control's value, `None` for parentless controls
fn get_form_element<'a, 'input>(
    doc: &'a Document<'input>,
    control: &Control,
    form_element: &str,
) -> Option<Node<'a, 'input>> {
    let Some(path) = control.instance_path(form_element) else {
        debug!(control = control.name(), "no parent bind, value not looked up");
        return None;
    };
    let found = path.find(doc.root());
    if found.is_none() {
        debug!(control = control.name(), path = %path, "no element in instance");
    }
    found
}

/// Fluent construction of a [`Runner`]
///
/// Exactly one of `builder` and `builder_xml` must be given.
pub struct RunnerOptions<'a> {
    xml: &'a [u8],
    builder: Option<Arc<Builder>>,
    builder_xml: Option<&'a [u8]>,
    config: FormConfig,
}

impl<'a> RunnerOptions<'a> {
    pub fn new(xml: &'a [u8]) -> Self {
        Self {
            xml,
            builder: None,
            builder_xml: None,
            config: FormConfig::default(),
        }
    }

    /// Use an already built definition
    pub fn builder(mut self, builder: Arc<Builder>) -> Self {
        self.builder = Some(builder);
        self
    }

    /// Build the definition from raw XML
    pub fn builder_xml(mut self, builder_xml: &'a [u8]) -> Self {
        self.builder_xml = Some(builder_xml);
        self
    }

    /// Locale for a definition built from `builder_xml`
    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.config.lang = lang.into();
        self
    }

    /// Full configuration for a definition built from `builder_xml`
    pub fn config(mut self, config: FormConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<Runner> {
        let builder = match (self.builder, self.builder_xml) {
            (Some(_), Some(_)) => return Err(FormError::ConflictingSources),
            (None, None) => return Err(FormError::MissingSource),
            (Some(builder), None) => builder,
            (None, Some(builder_xml)) => Arc::new(Builder::with_config(builder_xml, self.config)?),
        };
        Runner::new(self.xml, builder)
    }
}

/// Lookups keyed by sanitized control name (`fieldsdate` for `fields-date`)
///
/// Keys matching no control yield the `false` sentinel instead of an error.
#[derive(Debug, Clone, Copy)]
pub struct RunnerForm<'r> {
    runner: &'r Runner,
}

impl<'r> RunnerForm<'r> {
    pub fn get(&self, key: &str) -> Result<Option<&'r FormValue>> {
        match self.runner.builder.resolve_name(key) {
            Some(name) => self.runner.get_value(name),
            None => Ok(Some(&NOT_FOUND)),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.runner.builder.resolve_name(key).is_some()
    }
}
