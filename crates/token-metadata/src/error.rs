use program_address::AddressError;
use thiserror::Error;
use wire_codec::CodecError;

/// Errors raised while building or decoding token metadata instructions.
///
/// None of these are retried internally; every operation in this crate is a
/// pure computation.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Address(#[from] AddressError),

    #[error("missing required account: {0}")]
    MissingRequiredAccount(String),

    #[error("unknown account: {0}")]
    UnknownAccount(String),

    #[error("unknown instruction discriminant: {0}")]
    UnknownInstruction(u8),

    #[error("instruction has no client schema: {0}")]
    ReservedInstruction(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_missing_required_account() {
        let err = MetadataError::MissingRequiredAccount("BurnNft.owner".into());
        assert_eq!(err.to_string(), "missing required account: BurnNft.owner");
    }

    #[test]
    fn display_unknown_instruction() {
        assert_eq!(
            MetadataError::UnknownInstruction(200).to_string(),
            "unknown instruction discriminant: 200"
        );
    }

    #[test]
    fn codec_errors_pass_through_unchanged() {
        let inner = CodecError::MalformedPayload("need 1 bytes at offset 0, 0 left".into());
        let err: MetadataError = inner.clone().into();
        assert_eq!(err.to_string(), inner.to_string());
        assert!(matches!(err, MetadataError::Codec(_)));
    }

    #[test]
    fn address_errors_pass_through_unchanged() {
        let err: MetadataError = AddressError::NoValidAddress.into();
        assert_eq!(err.to_string(), AddressError::NoValidAddress.to_string());
    }

    #[test]
    fn error_trait_is_implemented() {
        let err: Box<dyn std::error::Error> =
            Box::new(MetadataError::InvalidConfig("test".into()));
        assert!(err.to_string().contains("test"));
    }
}
