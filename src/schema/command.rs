//! Command-type registry
//!
//! The leading byte of every frame payload. The numeric ids are fixed by
//! the protocol and must match the broker's table exactly.

/// Command types, by wire id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum CommandType {
    WireFormatInfo = 1,
    BrokerInfo = 2,
    ConnectionInfo = 3,
    SessionInfo = 4,
    ConsumerInfo = 5,
    ProducerInfo = 6,
    TransactionInfo = 7,
    DestinationInfo = 8,
    RemoveSubscriptionInfo = 9,
    KeepAliveInfo = 10,
    ShutdownInfo = 11,
    RemoveInfo = 12,
    ControlCommand = 14,
    FlushCommand = 15,
    ConnectionError = 16,
    ConsumerControl = 17,
    ConnectionControl = 18,
    MessageDispatch = 21,
    MessageAck = 22,
    ActiveMqMessage = 23,
    ActiveMqBytesMessage = 24,
    ActiveMqMapMessage = 25,
    ActiveMqObjectMessage = 26,
    ActiveMqStreamMessage = 27,
    ActiveMqTextMessage = 28,
    Response = 30,
    ExceptionResponse = 31,
    DataResponse = 32,
    DataArrayResponse = 33,
    IntegerResponse = 34,
    DiscoveryEvent = 40,
    JournalAck = 50,
    JournalRemove = 52,
    JournalTrace = 53,
    JournalTransaction = 54,
    DurableSubscriptionInfo = 55,
    PartialCommand = 60,
    PartialLastCommand = 61,
    Replay = 65,
    ByteType = 70,
    CharType = 71,
    ShortType = 72,
    IntegerType = 73,
    LongType = 74,
    DoubleType = 75,
    FloatType = 76,
    StringType = 77,
    BooleanType = 78,
    ByteArrayType = 79,
    MessageDispatchNotification = 90,
    NetworkBridgeFilter = 91,
    ActiveMqQueue = 100,
    ActiveMqTopic = 101,
    ActiveMqTempQueue = 102,
    ActiveMqTempTopic = 103,
    MessageId = 110,
    ActiveMqLocalTransactionId = 111,
    ActiveMqXaTransactionId = 112,
    ConnectionId = 120,
    SessionId = 121,
    ConsumerId = 122,
    ProducerId = 123,
    BrokerId = 124,
}

impl CommandType {
    /// Every command type, in id order
    pub const ALL: &'static [CommandType] = &[
        CommandType::WireFormatInfo,
        CommandType::BrokerInfo,
        CommandType::ConnectionInfo,
        CommandType::SessionInfo,
        CommandType::ConsumerInfo,
        CommandType::ProducerInfo,
        CommandType::TransactionInfo,
        CommandType::DestinationInfo,
        CommandType::RemoveSubscriptionInfo,
        CommandType::KeepAliveInfo,
        CommandType::ShutdownInfo,
        CommandType::RemoveInfo,
        CommandType::ControlCommand,
        CommandType::FlushCommand,
        CommandType::ConnectionError,
        CommandType::ConsumerControl,
        CommandType::ConnectionControl,
        CommandType::MessageDispatch,
        CommandType::MessageAck,
        CommandType::ActiveMqMessage,
        CommandType::ActiveMqBytesMessage,
        CommandType::ActiveMqMapMessage,
        CommandType::ActiveMqObjectMessage,
        CommandType::ActiveMqStreamMessage,
        CommandType::ActiveMqTextMessage,
        CommandType::Response,
        CommandType::ExceptionResponse,
        CommandType::DataResponse,
        CommandType::DataArrayResponse,
        CommandType::IntegerResponse,
        CommandType::DiscoveryEvent,
        CommandType::JournalAck,
        CommandType::JournalRemove,
        CommandType::JournalTrace,
        CommandType::JournalTransaction,
        CommandType::DurableSubscriptionInfo,
        CommandType::PartialCommand,
        CommandType::PartialLastCommand,
        CommandType::Replay,
        CommandType::ByteType,
        CommandType::CharType,
        CommandType::ShortType,
        CommandType::IntegerType,
        CommandType::LongType,
        CommandType::DoubleType,
        CommandType::FloatType,
        CommandType::StringType,
        CommandType::BooleanType,
        CommandType::ByteArrayType,
        CommandType::MessageDispatchNotification,
        CommandType::NetworkBridgeFilter,
        CommandType::ActiveMqQueue,
        CommandType::ActiveMqTopic,
        CommandType::ActiveMqTempQueue,
        CommandType::ActiveMqTempTopic,
        CommandType::MessageId,
        CommandType::ActiveMqLocalTransactionId,
        CommandType::ActiveMqXaTransactionId,
        CommandType::ConnectionId,
        CommandType::SessionId,
        CommandType::ConsumerId,
        CommandType::ProducerId,
        CommandType::BrokerId,
    ];

    /// The wire id
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Look up a command type by wire id
    pub fn from_id(id: u8) -> Option<Self> {
        let command = match id {
            1 => CommandType::WireFormatInfo,
            2 => CommandType::BrokerInfo,
            3 => CommandType::ConnectionInfo,
            4 => CommandType::SessionInfo,
            5 => CommandType::ConsumerInfo,
            6 => CommandType::ProducerInfo,
            7 => CommandType::TransactionInfo,
            8 => CommandType::DestinationInfo,
            9 => CommandType::RemoveSubscriptionInfo,
            10 => CommandType::KeepAliveInfo,
            11 => CommandType::ShutdownInfo,
            12 => CommandType::RemoveInfo,
            14 => CommandType::ControlCommand,
            15 => CommandType::FlushCommand,
            16 => CommandType::ConnectionError,
            17 => CommandType::ConsumerControl,
            18 => CommandType::ConnectionControl,
            21 => CommandType::MessageDispatch,
            22 => CommandType::MessageAck,
            23 => CommandType::ActiveMqMessage,
            24 => CommandType::ActiveMqBytesMessage,
            25 => CommandType::ActiveMqMapMessage,
            26 => CommandType::ActiveMqObjectMessage,
            27 => CommandType::ActiveMqStreamMessage,
            28 => CommandType::ActiveMqTextMessage,
            30 => CommandType::Response,
            31 => CommandType::ExceptionResponse,
            32 => CommandType::DataResponse,
            33 => CommandType::DataArrayResponse,
            34 => CommandType::IntegerResponse,
            40 => CommandType::DiscoveryEvent,
            50 => CommandType::JournalAck,
            52 => CommandType::JournalRemove,
            53 => CommandType::JournalTrace,
            54 => CommandType::JournalTransaction,
            55 => CommandType::DurableSubscriptionInfo,
            60 => CommandType::PartialCommand,
            61 => CommandType::PartialLastCommand,
            65 => CommandType::Replay,
            70 => CommandType::ByteType,
            71 => CommandType::CharType,
            72 => CommandType::ShortType,
            73 => CommandType::IntegerType,
            74 => CommandType::LongType,
            75 => CommandType::DoubleType,
            76 => CommandType::FloatType,
            77 => CommandType::StringType,
            78 => CommandType::BooleanType,
            79 => CommandType::ByteArrayType,
            90 => CommandType::MessageDispatchNotification,
            91 => CommandType::NetworkBridgeFilter,
            100 => CommandType::ActiveMqQueue,
            101 => CommandType::ActiveMqTopic,
            102 => CommandType::ActiveMqTempQueue,
            103 => CommandType::ActiveMqTempTopic,
            110 => CommandType::MessageId,
            111 => CommandType::ActiveMqLocalTransactionId,
            112 => CommandType::ActiveMqXaTransactionId,
            120 => CommandType::ConnectionId,
            121 => CommandType::SessionId,
            122 => CommandType::ConsumerId,
            123 => CommandType::ProducerId,
            124 => CommandType::BrokerId,
            _ => return None,
        };
        Some(command)
    }
}

impl TryFrom<u8> for CommandType {
    type Error = crate::error::WireError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        CommandType::from_id(id).ok_or(crate::error::WireError::UnknownCommand(id))
    }
}
