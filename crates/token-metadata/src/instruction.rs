//! Instruction discriminants of the token metadata program.
//!
//! The numbering is append-only. A retired instruction keeps its slot
//! forever so that older payloads keep decoding to the same operation.

use std::fmt;

use crate::error::MetadataError;

/// Every discriminant slot the program has ever assigned, in wire order.
///
/// Slots marked *reserved* are either deprecated on chain or have no client
/// schema here; [`crate::schema`] rejects them with
/// [`MetadataError::ReservedInstruction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum MetadataInstruction {
    CreateMetadataAccount = 0,
    UpdateMetadataAccount = 1,
    /// Reserved: deprecated on chain.
    DeprecatedCreateMasterEdition = 2,
    /// Reserved: deprecated on chain.
    DeprecatedMintNewEditionFromMasterEditionViaPrintingToken = 3,
    UpdatePrimarySaleHappenedViaToken = 4,
    /// Reserved: deprecated on chain.
    DeprecatedSetReservationList = 5,
    /// Reserved: deprecated on chain.
    DeprecatedCreateReservationList = 6,
    SignMetadata = 7,
    /// Reserved: deprecated on chain.
    DeprecatedMintPrintingTokensViaToken = 8,
    /// Reserved: deprecated on chain.
    DeprecatedMintPrintingTokens = 9,
    CreateMasterEdition = 10,
    MintNewEditionFromMasterEditionViaToken = 11,
    /// Reserved: no client schema.
    ConvertMasterEditionV1ToV2 = 12,
    /// Reserved: no client schema.
    MintNewEditionFromMasterEditionViaVaultProxy = 13,
    /// Reserved: no client schema.
    PuffMetadata = 14,
    UpdateMetadataAccountV2 = 15,
    CreateMetadataAccountV2 = 16,
    CreateMasterEditionV3 = 17,
    VerifyCollection = 18,
    Utilize = 19,
    ApproveUseAuthority = 20,
    RevokeUseAuthority = 21,
    UnverifyCollection = 22,
    ApproveCollectionAuthority = 23,
    RevokeCollectionAuthority = 24,
    SetAndVerifyCollection = 25,
    FreezeDelegatedAccount = 26,
    ThawDelegatedAccount = 27,
    RemoveCreatorVerification = 28,
    BurnNft = 29,
    VerifySizedCollectionItem = 30,
    UnverifySizedCollectionItem = 31,
    SetAndVerifySizedCollectionItem = 32,
    CreateMetadataAccountV3 = 33,
    SetCollectionSize = 34,
    SetTokenStandard = 35,
    /// Reserved: no client schema.
    BubblegumSetCollectionSize = 36,
    BurnEditionNft = 37,
}

impl MetadataInstruction {
    /// All slots, indexed by discriminant.
    pub const ALL: [MetadataInstruction; 38] = [
        Self::CreateMetadataAccount,
        Self::UpdateMetadataAccount,
        Self::DeprecatedCreateMasterEdition,
        Self::DeprecatedMintNewEditionFromMasterEditionViaPrintingToken,
        Self::UpdatePrimarySaleHappenedViaToken,
        Self::DeprecatedSetReservationList,
        Self::DeprecatedCreateReservationList,
        Self::SignMetadata,
        Self::DeprecatedMintPrintingTokensViaToken,
        Self::DeprecatedMintPrintingTokens,
        Self::CreateMasterEdition,
        Self::MintNewEditionFromMasterEditionViaToken,
        Self::ConvertMasterEditionV1ToV2,
        Self::MintNewEditionFromMasterEditionViaVaultProxy,
        Self::PuffMetadata,
        Self::UpdateMetadataAccountV2,
        Self::CreateMetadataAccountV2,
        Self::CreateMasterEditionV3,
        Self::VerifyCollection,
        Self::Utilize,
        Self::ApproveUseAuthority,
        Self::RevokeUseAuthority,
        Self::UnverifyCollection,
        Self::ApproveCollectionAuthority,
        Self::RevokeCollectionAuthority,
        Self::SetAndVerifyCollection,
        Self::FreezeDelegatedAccount,
        Self::ThawDelegatedAccount,
        Self::RemoveCreatorVerification,
        Self::BurnNft,
        Self::VerifySizedCollectionItem,
        Self::UnverifySizedCollectionItem,
        Self::SetAndVerifySizedCollectionItem,
        Self::CreateMetadataAccountV3,
        Self::SetCollectionSize,
        Self::SetTokenStandard,
        Self::BubblegumSetCollectionSize,
        Self::BurnEditionNft,
    ];

    pub fn discriminant(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::CreateMetadataAccount => "CreateMetadataAccount",
            Self::UpdateMetadataAccount => "UpdateMetadataAccount",
            Self::DeprecatedCreateMasterEdition => "DeprecatedCreateMasterEdition",
            Self::DeprecatedMintNewEditionFromMasterEditionViaPrintingToken => {
                "DeprecatedMintNewEditionFromMasterEditionViaPrintingToken"
            }
            Self::UpdatePrimarySaleHappenedViaToken => "UpdatePrimarySaleHappenedViaToken",
            Self::DeprecatedSetReservationList => "DeprecatedSetReservationList",
            Self::DeprecatedCreateReservationList => "DeprecatedCreateReservationList",
            Self::SignMetadata => "SignMetadata",
            Self::DeprecatedMintPrintingTokensViaToken => "DeprecatedMintPrintingTokensViaToken",
            Self::DeprecatedMintPrintingTokens => "DeprecatedMintPrintingTokens",
            Self::CreateMasterEdition => "CreateMasterEdition",
            Self::MintNewEditionFromMasterEditionViaToken => {
                "MintNewEditionFromMasterEditionViaToken"
            }
            Self::ConvertMasterEditionV1ToV2 => "ConvertMasterEditionV1ToV2",
            Self::MintNewEditionFromMasterEditionViaVaultProxy => {
                "MintNewEditionFromMasterEditionViaVaultProxy"
            }
            Self::PuffMetadata => "PuffMetadata",
            Self::UpdateMetadataAccountV2 => "UpdateMetadataAccountV2",
            Self::CreateMetadataAccountV2 => "CreateMetadataAccountV2",
            Self::CreateMasterEditionV3 => "CreateMasterEditionV3",
            Self::VerifyCollection => "VerifyCollection",
            Self::Utilize => "Utilize",
            Self::ApproveUseAuthority => "ApproveUseAuthority",
            Self::RevokeUseAuthority => "RevokeUseAuthority",
            Self::UnverifyCollection => "UnverifyCollection",
            Self::ApproveCollectionAuthority => "ApproveCollectionAuthority",
            Self::RevokeCollectionAuthority => "RevokeCollectionAuthority",
            Self::SetAndVerifyCollection => "SetAndVerifyCollection",
            Self::FreezeDelegatedAccount => "FreezeDelegatedAccount",
            Self::ThawDelegatedAccount => "ThawDelegatedAccount",
            Self::RemoveCreatorVerification => "RemoveCreatorVerification",
            Self::BurnNft => "BurnNft",
            Self::VerifySizedCollectionItem => "VerifySizedCollectionItem",
            Self::UnverifySizedCollectionItem => "UnverifySizedCollectionItem",
            Self::SetAndVerifySizedCollectionItem => "SetAndVerifySizedCollectionItem",
            Self::CreateMetadataAccountV3 => "CreateMetadataAccountV3",
            Self::SetCollectionSize => "SetCollectionSize",
            Self::SetTokenStandard => "SetTokenStandard",
            Self::BubblegumSetCollectionSize => "BubblegumSetCollectionSize",
            Self::BurnEditionNft => "BurnEditionNft",
        }
    }

    /// Slots the program itself no longer accepts.
    pub fn is_deprecated(self) -> bool {
        matches!(
            self,
            Self::DeprecatedCreateMasterEdition
                | Self::DeprecatedMintNewEditionFromMasterEditionViaPrintingToken
                | Self::DeprecatedSetReservationList
                | Self::DeprecatedCreateReservationList
                | Self::DeprecatedMintPrintingTokensViaToken
                | Self::DeprecatedMintPrintingTokens
        )
    }
}

impl TryFrom<u8> for MetadataInstruction {
    type Error = MetadataError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(value))
            .copied()
            .ok_or(MetadataError::UnknownInstruction(value))
    }
}

impl fmt::Display for MetadataInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_is_indexed_by_discriminant() {
        for (i, ix) in MetadataInstruction::ALL.iter().enumerate() {
            assert_eq!(usize::from(ix.discriminant()), i, "{ix}");
        }
    }

    #[test]
    fn try_from_roundtrips() {
        for ix in MetadataInstruction::ALL {
            assert_eq!(MetadataInstruction::try_from(ix.discriminant()).unwrap(), ix);
        }
    }

    #[test]
    fn try_from_rejects_unassigned() {
        for raw in 38u8..=255 {
            assert!(matches!(
                MetadataInstruction::try_from(raw),
                Err(MetadataError::UnknownInstruction(v)) if v == raw
            ));
        }
    }

    #[test]
    fn deprecated_slots() {
        let deprecated: Vec<u8> = MetadataInstruction::ALL
            .iter()
            .filter(|ix| ix.is_deprecated())
            .map(|ix| ix.discriminant())
            .collect();
        assert_eq!(deprecated, vec![2, 3, 5, 6, 8, 9]);
    }

    #[test]
    fn display_is_name() {
        assert_eq!(MetadataInstruction::BurnNft.to_string(), "BurnNft");
        assert_eq!(
            MetadataInstruction::CreateMetadataAccountV3.to_string(),
            "CreateMetadataAccountV3"
        );
    }
}
