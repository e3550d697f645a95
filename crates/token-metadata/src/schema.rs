//! Static account and argument tables, one per supported instruction.
//!
//! Account order, signer and writable flags follow the program's own account
//! declarations. Optional accounts always sit at the tail of a table, so an
//! omitted optional never shifts the index of a required one.

use wire_codec::{Field, FieldKind};

use crate::config::{
    ASSOCIATED_TOKEN_PROGRAM_ID, RENT_SYSVAR_ID, SYSTEM_PROGRAM_ID, TOKEN_PROGRAM_ID,
};
use crate::error::MetadataError;
use crate::instruction::{MetadataInstruction, MetadataInstruction as Ix};
use crate::types::{COLLECTION_DETAILS_KIND, DATA_KIND, DATA_V2_KIND};

/// Where a role's address comes from when the caller does not name it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountSource {
    /// The caller must supply it.
    Caller,
    /// A well-known program or sysvar. The caller may still override it,
    /// e.g. to point at Token-2022.
    Fixed([u8; 32]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignerRule {
    Never,
    Always,
    /// Signs only when the caller asks for it in [`crate::AccountInputs`].
    CallerDeclared,
}

/// One role in an instruction's account list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountSpec {
    pub name: &'static str,
    pub source: AccountSource,
    pub signer: SignerRule,
    pub writable: bool,
    /// Omitted from the account list when absent or all-zero.
    pub optional: bool,
}

impl AccountSpec {
    pub const fn readonly(name: &'static str) -> Self {
        Self {
            name,
            source: AccountSource::Caller,
            signer: SignerRule::Never,
            writable: false,
            optional: false,
        }
    }

    pub const fn writable(name: &'static str) -> Self {
        Self {
            writable: true,
            ..Self::readonly(name)
        }
    }

    pub const fn fixed(name: &'static str, key: [u8; 32]) -> Self {
        Self {
            source: AccountSource::Fixed(key),
            ..Self::readonly(name)
        }
    }

    pub const fn signer(self) -> Self {
        Self {
            signer: SignerRule::Always,
            ..self
        }
    }

    pub const fn caller_signer(self) -> Self {
        Self {
            signer: SignerRule::CallerDeclared,
            ..self
        }
    }

    pub const fn optional(self) -> Self {
        Self {
            optional: true,
            ..self
        }
    }
}

/// Discriminant, ordered account roles and ordered payload fields of one
/// instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstructionSchema {
    pub instruction: MetadataInstruction,
    pub accounts: &'static [AccountSpec],
    pub args: &'static [Field],
}

impl InstructionSchema {
    pub fn account(&self, name: &str) -> Option<&'static AccountSpec> {
        self.accounts.iter().find(|entry| entry.name == name)
    }

    pub fn required_accounts(&self) -> usize {
        self.accounts.iter().filter(|entry| !entry.optional).count()
    }
}

// ---------------------------------------------------------------------------
// Shared roles
// ---------------------------------------------------------------------------

const SYSTEM_PROGRAM: AccountSpec = AccountSpec::fixed("system_program", SYSTEM_PROGRAM_ID);
const RENT: AccountSpec = AccountSpec::fixed("rent", RENT_SYSVAR_ID);
const TOKEN_PROGRAM: AccountSpec = AccountSpec::fixed("token_program", TOKEN_PROGRAM_ID);
const SPL_TOKEN_PROGRAM: AccountSpec = AccountSpec::fixed("spl_token_program", TOKEN_PROGRAM_ID);
const ATA_PROGRAM: AccountSpec = AccountSpec::fixed("ata_program", ASSOCIATED_TOKEN_PROGRAM_ID);
const COLLECTION_AUTHORITY_RECORD: AccountSpec =
    AccountSpec::readonly("collection_authority_record").optional();

// ---------------------------------------------------------------------------
// Argument lists
// ---------------------------------------------------------------------------

const NO_ARGS: &[Field] = &[];

const CREATE_METADATA_ARGS: &[Field] = &[
    Field::new("data", DATA_KIND),
    Field::new("is_mutable", FieldKind::Bool),
];

const CREATE_METADATA_V2_ARGS: &[Field] = &[
    Field::new("data", DATA_V2_KIND),
    Field::new("is_mutable", FieldKind::Bool),
];

const CREATE_METADATA_V3_ARGS: &[Field] = &[
    Field::new("data", DATA_V2_KIND),
    Field::new("is_mutable", FieldKind::Bool),
    Field::new(
        "collection_details",
        FieldKind::Option(&COLLECTION_DETAILS_KIND),
    ),
];

const UPDATE_METADATA_ARGS: &[Field] = &[
    Field::new("data", FieldKind::Option(&DATA_KIND)),
    Field::new("update_authority", FieldKind::Option(&FieldKind::Pubkey)),
    Field::new("primary_sale_happened", FieldKind::Option(&FieldKind::Bool)),
];

const UPDATE_METADATA_V2_ARGS: &[Field] = &[
    Field::new("data", FieldKind::Option(&DATA_V2_KIND)),
    Field::new("update_authority", FieldKind::Option(&FieldKind::Pubkey)),
    Field::new("primary_sale_happened", FieldKind::Option(&FieldKind::Bool)),
    Field::new("is_mutable", FieldKind::Option(&FieldKind::Bool)),
];

const MASTER_EDITION_ARGS: &[Field] =
    &[Field::new("max_supply", FieldKind::Option(&FieldKind::U64))];

const MINT_EDITION_ARGS: &[Field] = &[Field::new("edition", FieldKind::U64)];

const USES_ARGS: &[Field] = &[Field::new("number_of_uses", FieldKind::U64)];

const COLLECTION_SIZE_ARGS: &[Field] = &[Field::new("size", FieldKind::U64)];

// ---------------------------------------------------------------------------
// Account lists
// ---------------------------------------------------------------------------

const CREATE_METADATA_ACCOUNTS: &[AccountSpec] = &[
    AccountSpec::writable("metadata"),
    AccountSpec::readonly("mint"),
    AccountSpec::readonly("mint_authority").signer(),
    AccountSpec::writable("payer").signer(),
    AccountSpec::readonly("update_authority").caller_signer(),
    SYSTEM_PROGRAM,
    RENT,
];

const CREATE_METADATA_V2_ACCOUNTS: &[AccountSpec] = &[
    AccountSpec::writable("metadata"),
    AccountSpec::readonly("mint"),
    AccountSpec::readonly("mint_authority").signer(),
    AccountSpec::writable("payer").signer(),
    AccountSpec::readonly("update_authority").caller_signer(),
    SYSTEM_PROGRAM,
    RENT.optional(),
];

const UPDATE_METADATA_ACCOUNTS: &[AccountSpec] = &[
    AccountSpec::writable("metadata"),
    AccountSpec::readonly("update_authority").signer(),
];

const UPDATE_PRIMARY_SALE_ACCOUNTS: &[AccountSpec] = &[
    AccountSpec::writable("metadata"),
    AccountSpec::readonly("owner").signer(),
    AccountSpec::readonly("token"),
];

const CREATOR_ACCOUNTS: &[AccountSpec] = &[
    AccountSpec::writable("metadata"),
    AccountSpec::readonly("creator").signer(),
];

const CREATE_MASTER_EDITION_ACCOUNTS: &[AccountSpec] = &[
    AccountSpec::writable("edition"),
    AccountSpec::writable("mint"),
    AccountSpec::readonly("update_authority").signer(),
    AccountSpec::readonly("mint_authority").signer(),
    AccountSpec::writable("payer").signer(),
    AccountSpec::readonly("metadata"),
    TOKEN_PROGRAM,
    SYSTEM_PROGRAM,
    RENT,
];

const CREATE_MASTER_EDITION_V3_ACCOUNTS: &[AccountSpec] = &[
    AccountSpec::writable("edition"),
    AccountSpec::writable("mint"),
    AccountSpec::readonly("update_authority").signer(),
    AccountSpec::readonly("mint_authority").signer(),
    AccountSpec::writable("payer").signer(),
    AccountSpec::writable("metadata"),
    TOKEN_PROGRAM,
    SYSTEM_PROGRAM,
    RENT.optional(),
];

const MINT_EDITION_ACCOUNTS: &[AccountSpec] = &[
    AccountSpec::writable("new_metadata"),
    AccountSpec::writable("new_edition"),
    AccountSpec::writable("master_edition"),
    AccountSpec::writable("new_mint"),
    AccountSpec::writable("edition_mark_pda"),
    AccountSpec::readonly("new_mint_authority").signer(),
    AccountSpec::writable("payer").signer(),
    AccountSpec::readonly("token_account_owner").signer(),
    AccountSpec::readonly("token_account"),
    AccountSpec::readonly("new_metadata_update_authority"),
    AccountSpec::readonly("metadata"),
    TOKEN_PROGRAM,
    SYSTEM_PROGRAM,
    RENT.optional(),
];

const VERIFY_COLLECTION_ACCOUNTS: &[AccountSpec] = &[
    AccountSpec::writable("metadata"),
    AccountSpec::writable("collection_authority").signer(),
    AccountSpec::writable("payer").signer(),
    AccountSpec::readonly("collection_mint"),
    AccountSpec::readonly("collection"),
    AccountSpec::readonly("collection_master_edition_account"),
    COLLECTION_AUTHORITY_RECORD,
];

const UTILIZE_ACCOUNTS: &[AccountSpec] = &[
    AccountSpec::writable("metadata"),
    AccountSpec::writable("token_account"),
    AccountSpec::writable("mint"),
    AccountSpec::writable("use_authority").signer(),
    AccountSpec::readonly("owner"),
    TOKEN_PROGRAM,
    ATA_PROGRAM,
    SYSTEM_PROGRAM,
    RENT,
    AccountSpec::writable("use_authority_record").optional(),
    AccountSpec::readonly("burner").optional(),
];

const APPROVE_USE_AUTHORITY_ACCOUNTS: &[AccountSpec] = &[
    AccountSpec::writable("use_authority_record"),
    AccountSpec::writable("owner").signer(),
    AccountSpec::writable("payer").signer(),
    AccountSpec::readonly("user"),
    AccountSpec::writable("owner_token_account"),
    AccountSpec::readonly("metadata"),
    AccountSpec::readonly("mint"),
    AccountSpec::readonly("burner"),
    TOKEN_PROGRAM,
    SYSTEM_PROGRAM,
    RENT.optional(),
];

const REVOKE_USE_AUTHORITY_ACCOUNTS: &[AccountSpec] = &[
    AccountSpec::writable("use_authority_record"),
    AccountSpec::writable("owner").signer(),
    AccountSpec::readonly("user"),
    AccountSpec::writable("owner_token_account"),
    AccountSpec::readonly("mint"),
    AccountSpec::readonly("metadata"),
    TOKEN_PROGRAM,
    SYSTEM_PROGRAM,
    RENT.optional(),
];

const UNVERIFY_COLLECTION_ACCOUNTS: &[AccountSpec] = &[
    AccountSpec::writable("metadata"),
    AccountSpec::writable("collection_authority").signer(),
    AccountSpec::readonly("collection_mint"),
    AccountSpec::readonly("collection"),
    AccountSpec::readonly("collection_master_edition_account"),
    COLLECTION_AUTHORITY_RECORD,
];

const APPROVE_COLLECTION_AUTHORITY_ACCOUNTS: &[AccountSpec] = &[
    AccountSpec::writable("collection_authority_record"),
    AccountSpec::readonly("new_collection_authority"),
    AccountSpec::writable("update_authority").signer(),
    AccountSpec::writable("payer").signer(),
    AccountSpec::readonly("metadata"),
    AccountSpec::readonly("mint"),
    SYSTEM_PROGRAM,
    RENT.optional(),
];

const REVOKE_COLLECTION_AUTHORITY_ACCOUNTS: &[AccountSpec] = &[
    AccountSpec::writable("collection_authority_record"),
    AccountSpec::writable("delegate_authority"),
    AccountSpec::writable("revoke_authority").signer(),
    AccountSpec::readonly("metadata"),
    AccountSpec::readonly("mint"),
];

const SET_AND_VERIFY_COLLECTION_ACCOUNTS: &[AccountSpec] = &[
    AccountSpec::writable("metadata"),
    AccountSpec::writable("collection_authority").signer(),
    AccountSpec::writable("payer").signer(),
    AccountSpec::readonly("update_authority"),
    AccountSpec::readonly("collection_mint"),
    AccountSpec::readonly("collection"),
    AccountSpec::readonly("collection_master_edition_account"),
    COLLECTION_AUTHORITY_RECORD,
];

const DELEGATED_ACCOUNT_ACCOUNTS: &[AccountSpec] = &[
    AccountSpec::writable("delegate").signer(),
    AccountSpec::writable("token_account"),
    AccountSpec::readonly("edition"),
    AccountSpec::readonly("mint"),
    TOKEN_PROGRAM,
];

const BURN_NFT_ACCOUNTS: &[AccountSpec] = &[
    AccountSpec::writable("metadata"),
    AccountSpec::writable("owner").signer(),
    AccountSpec::writable("mint"),
    AccountSpec::writable("token_account"),
    AccountSpec::writable("master_edition_account"),
    SPL_TOKEN_PROGRAM,
    AccountSpec::writable("collection_metadata").optional(),
];

const SIZED_COLLECTION_ITEM_ACCOUNTS: &[AccountSpec] = &[
    AccountSpec::writable("metadata"),
    AccountSpec::readonly("collection_authority").signer(),
    AccountSpec::writable("payer").signer(),
    AccountSpec::readonly("collection_mint"),
    AccountSpec::writable("collection"),
    AccountSpec::readonly("collection_master_edition_account"),
    COLLECTION_AUTHORITY_RECORD,
];

const SET_AND_VERIFY_SIZED_COLLECTION_ITEM_ACCOUNTS: &[AccountSpec] = &[
    AccountSpec::writable("metadata"),
    AccountSpec::readonly("collection_authority").signer(),
    AccountSpec::writable("payer").signer(),
    AccountSpec::readonly("update_authority"),
    AccountSpec::readonly("collection_mint"),
    AccountSpec::writable("collection"),
    AccountSpec::writable("collection_master_edition_account"),
    COLLECTION_AUTHORITY_RECORD,
];

const SET_COLLECTION_SIZE_ACCOUNTS: &[AccountSpec] = &[
    AccountSpec::writable("collection_metadata"),
    AccountSpec::writable("collection_authority").signer(),
    AccountSpec::readonly("collection_mint"),
    COLLECTION_AUTHORITY_RECORD,
];

const SET_TOKEN_STANDARD_ACCOUNTS: &[AccountSpec] = &[
    AccountSpec::writable("metadata"),
    AccountSpec::writable("update_authority").signer(),
    AccountSpec::readonly("mint"),
    AccountSpec::readonly("edition").optional(),
];

const BURN_EDITION_NFT_ACCOUNTS: &[AccountSpec] = &[
    AccountSpec::writable("metadata"),
    AccountSpec::writable("owner").signer(),
    AccountSpec::writable("print_edition_mint"),
    AccountSpec::readonly("master_edition_mint"),
    AccountSpec::writable("print_edition_token_account"),
    AccountSpec::readonly("master_edition_token_account"),
    AccountSpec::writable("master_edition_account"),
    AccountSpec::writable("print_edition_account"),
    AccountSpec::writable("edition_marker_account"),
    SPL_TOKEN_PROGRAM,
];

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

const fn entry(
    instruction: MetadataInstruction,
    accounts: &'static [AccountSpec],
    args: &'static [Field],
) -> InstructionSchema {
    InstructionSchema {
        instruction,
        accounts,
        args,
    }
}

/// Every instruction with a client schema, in discriminant order.
pub static SCHEMAS: [InstructionSchema; 28] = [
    entry(Ix::CreateMetadataAccount, CREATE_METADATA_ACCOUNTS, CREATE_METADATA_ARGS),
    entry(Ix::UpdateMetadataAccount, UPDATE_METADATA_ACCOUNTS, UPDATE_METADATA_ARGS),
    entry(Ix::UpdatePrimarySaleHappenedViaToken, UPDATE_PRIMARY_SALE_ACCOUNTS, NO_ARGS),
    entry(Ix::SignMetadata, CREATOR_ACCOUNTS, NO_ARGS),
    entry(Ix::CreateMasterEdition, CREATE_MASTER_EDITION_ACCOUNTS, MASTER_EDITION_ARGS),
    entry(Ix::MintNewEditionFromMasterEditionViaToken, MINT_EDITION_ACCOUNTS, MINT_EDITION_ARGS),
    entry(Ix::UpdateMetadataAccountV2, UPDATE_METADATA_ACCOUNTS, UPDATE_METADATA_V2_ARGS),
    entry(Ix::CreateMetadataAccountV2, CREATE_METADATA_V2_ACCOUNTS, CREATE_METADATA_V2_ARGS),
    entry(Ix::CreateMasterEditionV3, CREATE_MASTER_EDITION_V3_ACCOUNTS, MASTER_EDITION_ARGS),
    entry(Ix::VerifyCollection, VERIFY_COLLECTION_ACCOUNTS, NO_ARGS),
    entry(Ix::Utilize, UTILIZE_ACCOUNTS, USES_ARGS),
    entry(Ix::ApproveUseAuthority, APPROVE_USE_AUTHORITY_ACCOUNTS, USES_ARGS),
    entry(Ix::RevokeUseAuthority, REVOKE_USE_AUTHORITY_ACCOUNTS, NO_ARGS),
    entry(Ix::UnverifyCollection, UNVERIFY_COLLECTION_ACCOUNTS, NO_ARGS),
    entry(Ix::ApproveCollectionAuthority, APPROVE_COLLECTION_AUTHORITY_ACCOUNTS, NO_ARGS),
    entry(Ix::RevokeCollectionAuthority, REVOKE_COLLECTION_AUTHORITY_ACCOUNTS, NO_ARGS),
    entry(Ix::SetAndVerifyCollection, SET_AND_VERIFY_COLLECTION_ACCOUNTS, NO_ARGS),
    entry(Ix::FreezeDelegatedAccount, DELEGATED_ACCOUNT_ACCOUNTS, NO_ARGS),
    entry(Ix::ThawDelegatedAccount, DELEGATED_ACCOUNT_ACCOUNTS, NO_ARGS),
    entry(Ix::RemoveCreatorVerification, CREATOR_ACCOUNTS, NO_ARGS),
    entry(Ix::BurnNft, BURN_NFT_ACCOUNTS, NO_ARGS),
    entry(Ix::VerifySizedCollectionItem, SIZED_COLLECTION_ITEM_ACCOUNTS, NO_ARGS),
    entry(Ix::UnverifySizedCollectionItem, SIZED_COLLECTION_ITEM_ACCOUNTS, NO_ARGS),
    entry(
        Ix::SetAndVerifySizedCollectionItem,
        SET_AND_VERIFY_SIZED_COLLECTION_ITEM_ACCOUNTS,
        NO_ARGS,
    ),
    entry(Ix::CreateMetadataAccountV3, CREATE_METADATA_V2_ACCOUNTS, CREATE_METADATA_V3_ARGS),
    entry(Ix::SetCollectionSize, SET_COLLECTION_SIZE_ACCOUNTS, COLLECTION_SIZE_ARGS),
    entry(Ix::SetTokenStandard, SET_TOKEN_STANDARD_ACCOUNTS, NO_ARGS),
    entry(Ix::BurnEditionNft, BURN_EDITION_NFT_ACCOUNTS, NO_ARGS),
];

/// Look up the schema of `instruction`.
///
/// Deprecated slots and slots without a client schema fail with
/// [`MetadataError::ReservedInstruction`].
pub fn schema(instruction: MetadataInstruction) -> Result<&'static InstructionSchema, MetadataError> {
    SCHEMAS
        .iter()
        .find(|s| s.instruction == instruction)
        .ok_or_else(|| MetadataError::ReservedInstruction(instruction.name().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_sorted_and_unique() {
        for pair in SCHEMAS.windows(2) {
            assert!(pair[0].instruction < pair[1].instruction);
        }
    }

    #[test]
    fn reserved_slots_have_no_schema() {
        let reserved: Vec<u8> = MetadataInstruction::ALL
            .iter()
            .filter(|ix| schema(**ix).is_err())
            .map(|ix| ix.discriminant())
            .collect();
        assert_eq!(reserved, vec![2, 3, 5, 6, 8, 9, 12, 13, 14, 36]);
    }

    #[test]
    fn reserved_error_names_instruction() {
        let err = schema(MetadataInstruction::PuffMetadata).unwrap_err();
        assert_eq!(err.to_string(), "instruction has no client schema: PuffMetadata");
    }

    #[test]
    fn optional_roles_are_at_the_tail() {
        for s in &SCHEMAS {
            let first_optional = s.accounts.iter().position(|a| a.optional);
            if let Some(idx) = first_optional {
                assert!(
                    s.accounts[idx..].iter().all(|a| a.optional),
                    "{}: required role after optional",
                    s.instruction
                );
            }
        }
    }

    #[test]
    fn role_names_unique_per_instruction() {
        for s in &SCHEMAS {
            for (i, a) in s.accounts.iter().enumerate() {
                assert!(
                    s.accounts[i + 1..].iter().all(|b| b.name != a.name),
                    "{}: duplicate role {}",
                    s.instruction,
                    a.name
                );
            }
        }
    }

    #[test]
    fn create_metadata_v1_layout() {
        let s = schema(MetadataInstruction::CreateMetadataAccount).unwrap();
        let names: Vec<&str> = s.accounts.iter().map(|a| a.name).collect();
        assert_eq!(
            names,
            [
                "metadata",
                "mint",
                "mint_authority",
                "payer",
                "update_authority",
                "system_program",
                "rent"
            ]
        );
        assert_eq!(s.required_accounts(), 7);
        assert_eq!(
            s.account("update_authority").unwrap().signer,
            SignerRule::CallerDeclared
        );
        assert_eq!(
            s.account("rent").unwrap().source,
            AccountSource::Fixed(RENT_SYSVAR_ID)
        );
    }

    #[test]
    fn burn_nft_collection_metadata_is_optional_tail() {
        let s = schema(MetadataInstruction::BurnNft).unwrap();
        assert_eq!(s.accounts.len(), 7);
        let last = s.accounts[6];
        assert_eq!(last.name, "collection_metadata");
        assert!(last.optional && last.writable);
    }

    #[test]
    fn burn_edition_master_mint_is_readonly() {
        let s = schema(MetadataInstruction::BurnEditionNft).unwrap();
        let entry = s.account("master_edition_mint").unwrap();
        assert!(!entry.writable);
        assert_eq!(entry.signer, SignerRule::Never);
    }

    #[test]
    fn thaw_has_no_payload() {
        let s = schema(MetadataInstruction::ThawDelegatedAccount).unwrap();
        assert!(s.args.is_empty());
    }
}
