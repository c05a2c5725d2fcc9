//! Built-in message descriptors
//!
//! Field tables for the commands this crate knows how to marshal.
//! Versions record the protocol revision that introduced each field.

use crate::message::{Message, PropertyMap};
use crate::wire::WireType;
use super::{CommandType, FieldDescriptor, FieldType, MessageDescriptor, PropertySpec};

/// Magic prefix of every WireFormatInfo
pub const MAGIC: &[u8; 8] = b"ActiveMQ";

// =============================================================================
// WireFormatInfo
// =============================================================================

/// Known negotiation properties and their types
pub const WIRE_FORMAT_PROPERTIES: &[PropertySpec] = &[
    PropertySpec::new("TcpNoDelayEnabled", WireType::Bool),
    PropertySpec::new("SizePrefixDisabled", WireType::Bool),
    PropertySpec::new("CacheSize", WireType::Int),
    PropertySpec::new("ProviderName", WireType::String),
    PropertySpec::new("StackTraceEnabled", WireType::Bool),
    PropertySpec::new("PlatformDetails", WireType::String),
    PropertySpec::new("CacheEnabled", WireType::Bool),
    PropertySpec::new("TightEncodingEnabled", WireType::Bool),
    PropertySpec::new("MaxFrameSize", WireType::Long),
    PropertySpec::new("MaxInactivityDuration", WireType::Long),
    PropertySpec::new("MaxInactivityDurationInitalDelay", WireType::Long),
    PropertySpec::new("ProviderVersion", WireType::String),
];

pub static WIRE_FORMAT_INFO: MessageDescriptor = MessageDescriptor {
    command: CommandType::WireFormatInfo,
    name: "WireFormatInfo",
    fields: &[
        FieldDescriptor::new("magic", FieldType::Raw(8), 1),
        FieldDescriptor::new("version", FieldType::INT, 1),
        FieldDescriptor::new("data", FieldType::BOOL, 1),
        FieldDescriptor::new("properties", FieldType::PropertyMap(WIRE_FORMAT_PROPERTIES), 1),
    ],
};

/// Build a WireFormatInfo announcing `version` with the given properties
pub fn wire_format_info(version: i32, properties: PropertyMap) -> Message {
    Message::new(&WIRE_FORMAT_INFO)
        .with("magic", &MAGIC[..])
        .with("version", version)
        .with("data", true)
        .with("properties", properties)
}

/// The negotiation properties a stock client announces
pub fn default_wire_format_properties() -> PropertyMap {
    let mut props = PropertyMap::new();
    props.insert("TcpNoDelayEnabled", true);
    props.insert("SizePrefixDisabled", false);
    props.insert("CacheSize", 1024i32);
    props.insert("ProviderName", "ActiveMQ");
    props.insert("StackTraceEnabled", true);
    props.insert("PlatformDetails", "Java");
    props.insert("CacheEnabled", true);
    props.insert("TightEncodingEnabled", false);
    props.insert("MaxFrameSize", 104_857_600i64);
    props.insert("MaxInactivityDuration", 30_000i64);
    props.insert("MaxInactivityDurationInitalDelay", 10_000i64);
    props.insert("ProviderVersion", "5.15.8");
    props
}

// =============================================================================
// Broker
// =============================================================================

pub static BROKER_ID: MessageDescriptor = MessageDescriptor {
    command: CommandType::BrokerId,
    name: "BrokerId",
    fields: &[FieldDescriptor::new("value", FieldType::STRING, 1)],
};

pub static BROKER_INFO: MessageDescriptor = MessageDescriptor {
    command: CommandType::BrokerInfo,
    name: "BrokerInfo",
    fields: &[
        FieldDescriptor::new("brokerId", FieldType::Message(&BROKER_ID), 1),
        FieldDescriptor::new("brokerURL", FieldType::STRING, 1),
        FieldDescriptor::new("peerBrokerInfos", FieldType::MessageList(&BROKER_INFO), 1),
        FieldDescriptor::new("brokerName", FieldType::STRING, 1),
        FieldDescriptor::new("slaveBroker", FieldType::BOOL, 1),
        FieldDescriptor::new("masterBroker", FieldType::BOOL, 1),
        FieldDescriptor::new("faultTolerantConfiguration", FieldType::BOOL, 1),
        FieldDescriptor::new("duplexConnection", FieldType::BOOL, 2),
        FieldDescriptor::new("networkConnection", FieldType::BOOL, 2),
        FieldDescriptor::new("connectionId", FieldType::LONG, 2),
        FieldDescriptor::new("brokerUploadUrl", FieldType::STRING, 3),
        FieldDescriptor::new("networkProperties", FieldType::STRING, 3),
    ],
};

// =============================================================================
// Keep-alive / shutdown
// =============================================================================

pub static KEEP_ALIVE_INFO: MessageDescriptor = MessageDescriptor {
    command: CommandType::KeepAliveInfo,
    name: "KeepAliveInfo",
    fields: &[],
};

pub static SHUTDOWN_INFO: MessageDescriptor = MessageDescriptor {
    command: CommandType::ShutdownInfo,
    name: "ShutdownInfo",
    fields: &[],
};

// =============================================================================
// Identifiers
// =============================================================================

pub static CONNECTION_ID: MessageDescriptor = MessageDescriptor {
    command: CommandType::ConnectionId,
    name: "ConnectionId",
    fields: &[FieldDescriptor::new("value", FieldType::STRING, 1)],
};

pub static SESSION_ID: MessageDescriptor = MessageDescriptor {
    command: CommandType::SessionId,
    name: "SessionId",
    fields: &[
        FieldDescriptor::new("connectionId", FieldType::STRING, 1),
        FieldDescriptor::new("value", FieldType::LONG, 1),
    ],
};

pub static CONSUMER_ID: MessageDescriptor = MessageDescriptor {
    command: CommandType::ConsumerId,
    name: "ConsumerId",
    fields: &[
        FieldDescriptor::new("connectionId", FieldType::STRING, 1),
        FieldDescriptor::new("sessionId", FieldType::LONG, 1),
        FieldDescriptor::new("value", FieldType::LONG, 1),
    ],
};

pub static PRODUCER_ID: MessageDescriptor = MessageDescriptor {
    command: CommandType::ProducerId,
    name: "ProducerId",
    fields: &[
        FieldDescriptor::new("connectionId", FieldType::STRING, 1),
        FieldDescriptor::new("sessionId", FieldType::LONG, 1),
        FieldDescriptor::new("value", FieldType::LONG, 1),
    ],
};

/// Every built-in descriptor
pub static BUILTIN: &[&MessageDescriptor] = &[
    &WIRE_FORMAT_INFO,
    &BROKER_INFO,
    &BROKER_ID,
    &KEEP_ALIVE_INFO,
    &SHUTDOWN_INFO,
    &CONNECTION_ID,
    &SESSION_ID,
    &CONSUMER_ID,
    &PRODUCER_ID,
];
