// crates/pimad-rs-caex/src/model.rs

//! Internal `serde` data structures that map directly to the CAEX XML schema
//! used by MTP files (VDI/VDE/NAMUR 2658, CAEX 2.15).
//!
//! These structs describe the raw structure of a CAEX file and are annotated
//! for parsing via `quick-xml`. They are transient: an importer invocation
//! deserializes into them, extracts what it needs and discards them.
//!
//! CAEX serializes a single child without any list wrapper. Every repeatable
//! child is therefore a `#[serde(default)] Vec`, so one child and many
//! children deserialize identically and no downstream code ever has to
//! distinguish the two shapes.

use serde::Deserialize;

/// The root `<CAEXFile>` element.
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(rename = "CAEXFile")]
pub struct CaexFile {
    #[serde(rename = "@FileName", default)]
    pub file_name: String,

    #[serde(rename = "@SchemaVersion", default)]
    pub schema_version: String,

    /// The top-level hierarchies; an MTP file carries one named
    /// `ModuleTypePackage` and one named `Services`.
    #[serde(rename = "InstanceHierarchy", default)]
    pub instance_hierarchy: Vec<InstanceHierarchy>,
}

/// An `<InstanceHierarchy>` entry, discriminated by its `Name`.
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct InstanceHierarchy {
    #[serde(rename = "@Name", default)]
    pub name: String,

    #[serde(rename = "InternalElement", default)]
    pub internal_element: Vec<InternalElement>,
}

/// An `<InternalElement>`: the general-purpose node of the CAEX tree.
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct InternalElement {
    #[serde(rename = "@Name", default)]
    pub name: String,

    #[serde(rename = "@ID", default)]
    pub id: String,

    /// Names the element's type in the MTP system unit class libraries;
    /// extraction classifies elements by suffix of this path.
    #[serde(rename = "@RefBaseSystemUnitPath", default)]
    pub ref_base_system_unit_path: String,

    #[serde(rename = "Attribute", default)]
    pub attribute: Vec<CaexAttribute>,

    #[serde(rename = "ExternalInterface", default)]
    pub external_interface: Vec<ExternalInterface>,

    #[serde(rename = "InternalElement", default)]
    pub internal_element: Vec<InternalElement>,
}

impl InternalElement {
    /// The value of the named attribute, if present and non-empty.
    pub fn attribute_value(&self, name: &str) -> Option<&str> {
        attribute_value(&self.attribute, name)
    }

    /// The value of the element's `RefID` attribute: its cross-reference
    /// join key into the CommunicationSet.
    pub fn ref_id(&self) -> Option<&str> {
        self.attribute_value("RefID")
    }
}

/// An `<Attribute>` element: a name/type/value triple.
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct CaexAttribute {
    #[serde(rename = "@Name", default)]
    pub name: String,

    #[serde(rename = "@AttributeDataType", default)]
    pub data_type: String,

    #[serde(rename = "Value", default)]
    pub value: Option<String>,
}

/// An `<ExternalInterface>`: an OPC UA node binding below a server
/// assembly, referenced from data assemblies via `xs:IDREF` attributes.
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct ExternalInterface {
    #[serde(rename = "@Name", default)]
    pub name: String,

    #[serde(rename = "@ID", default)]
    pub id: String,

    #[serde(rename = "@RefBaseClassPath", default)]
    pub ref_base_class_path: String,

    #[serde(rename = "Attribute", default)]
    pub attribute: Vec<CaexAttribute>,
}

impl ExternalInterface {
    /// The value of the named attribute, if present and non-empty.
    pub fn attribute_value(&self, name: &str) -> Option<&str> {
        attribute_value(&self.attribute, name)
    }
}

/// Looks up an attribute by name and returns its non-empty value.
fn attribute_value<'a>(attributes: &'a [CaexAttribute], name: &str) -> Option<&'a str> {
    attributes
        .iter()
        .find(|a| a.name == name)
        .and_then(|a| a.value.as_deref())
        .filter(|v| !v.is_empty())
}
