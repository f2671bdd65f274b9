// crates/pimad-rs/src/comm.rs

//! Communication endpoint descriptors extracted from the CommunicationSet.
//!
//! The SourceList of an MTP file describes OPC UA servers; the
//! ExternalInterface bindings below them describe the nodes a data
//! assembly's data items map to. Both are represented by
//! [`CommunicationInterfaceData`].

/// An OPC UA node identifier as carried by an `ExternalInterface` binding.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NodeId {
    /// Namespace the node lives in (the raw `Namespace` attribute value).
    pub namespace: String,
    /// Node identifier within that namespace (e.g. `ns=3;s=...`).
    pub identifier: String,
}

/// Access level of an OPC UA node binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeAccess {
    ReadOnly,
    WriteOnly,
    #[default]
    ReadWrite,
}

impl NodeAccess {
    /// Lenient mapping of the CAEX `Access` attribute value.
    ///
    /// Unknown or absent values fall back to [`NodeAccess::ReadWrite`];
    /// the access level is advisory and must not fail an import.
    pub fn parse(value: &str) -> Self {
        match value {
            "ReadOnly" => NodeAccess::ReadOnly,
            "WriteOnly" => NodeAccess::WriteOnly,
            _ => NodeAccess::ReadWrite,
        }
    }
}

/// An OPC UA server endpoint from the SourceList.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpcUaServer {
    /// The `Name` of the server assembly element.
    pub name: String,
    /// The `Endpoint` attribute, e.g. `opc.tcp://host:4840`.
    pub endpoint_url: String,
}

/// An OPC UA node binding resolved from an `ExternalInterface`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpcUaNode {
    pub node: NodeId,
    pub access: NodeAccess,
}

/// A communication endpoint a data item or a PEA endpoint list points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommunicationInterfaceData {
    /// An OPC UA server descriptor.
    Server(OpcUaServer),
    /// A single OPC UA node on one of those servers.
    Node(OpcUaNode),
}
