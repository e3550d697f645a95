//! Generic instruction builder driven by the schema table.
//!
//! ```text
//! data = discriminant (u8) || encode(args, schema.args)
//! accounts = schema.accounts, in order, with caller addresses substituted
//!            and absent or all-zero optional roles dropped
//! ```

use std::collections::BTreeMap;

use wire_codec::Value;

use crate::args::InstructionArgs;
use crate::config::MetadataConfig;
use crate::error::MetadataError;
use crate::instruction::MetadataInstruction;
use crate::schema::{schema, AccountSource, SignerRule};

const ZERO_KEY: [u8; 32] = [0u8; 32];

/// An account reference inside an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountMeta {
    pub pubkey: [u8; 32],
    pub is_signer: bool,
    pub is_writable: bool,
}

/// A finished request: program id, ordered accounts and payload bytes,
/// ready to be compiled into a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub program_id: [u8; 32],
    pub accounts: Vec<AccountMeta>,
    pub data: Vec<u8>,
}

impl Instruction {
    pub fn discriminant(&self) -> Option<u8> {
        self.data.first().copied()
    }

    pub fn signers(&self) -> impl Iterator<Item = &[u8; 32]> {
        self.accounts
            .iter()
            .filter(|meta| meta.is_signer)
            .map(|meta| &meta.pubkey)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AccountInput {
    address: [u8; 32],
    signer: bool,
}

/// Addresses the caller supplies, keyed by role name.
///
/// Role names are the ones in the instruction's schema (`"metadata"`,
/// `"payer"`, `"collection_metadata"`, ...). Fixed program accounts need not
/// be supplied, but supplying one overrides the default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountInputs {
    accounts: BTreeMap<String, AccountInput>,
}

impl AccountInputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Supply `address` for `role`.
    pub fn with(mut self, role: &str, address: [u8; 32]) -> Self {
        self.set(role, address, false);
        self
    }

    /// Supply `address` for `role` and ask for it to sign. Only honoured for
    /// roles whose signer rule is [`SignerRule::CallerDeclared`].
    pub fn with_signer(mut self, role: &str, address: [u8; 32]) -> Self {
        self.set(role, address, true);
        self
    }

    pub fn set(&mut self, role: &str, address: [u8; 32], signer: bool) {
        self.accounts
            .insert(role.to_string(), AccountInput { address, signer });
    }

    pub fn get(&self, role: &str) -> Option<[u8; 32]> {
        self.accounts.get(role).map(|input| input.address)
    }

    fn wants_signer(&self, role: &str) -> bool {
        self.accounts.get(role).is_some_and(|input| input.signer)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    fn roles(&self) -> impl Iterator<Item = &str> {
        self.accounts.keys().map(String::as_str)
    }
}

/// Build `instruction` from caller addresses and payload values.
///
/// `args` are the payload values in schema order, without the discriminant.
/// Required roles must be supplied (fixed program roles are filled in);
/// optional roles are appended only when supplied with a non-zero address.
pub fn build_instruction(
    config: &MetadataConfig,
    instruction: MetadataInstruction,
    inputs: &AccountInputs,
    args: &[Value],
) -> Result<Instruction, MetadataError> {
    let schema = schema(instruction)?;

    if let Some(role) = inputs.roles().find(|role| schema.account(role).is_none()) {
        return Err(MetadataError::UnknownAccount(format!("{instruction}.{role}")));
    }

    let mut accounts = Vec::with_capacity(schema.accounts.len());
    let mut omitted: Option<&'static str> = None;

    for entry in schema.accounts {
        let address = inputs.get(entry.name).or(match entry.source {
            AccountSource::Fixed(key) => Some(key),
            AccountSource::Caller => None,
        });

        let address = match address {
            Some(address) if !entry.optional => address,
            Some(address) if address != ZERO_KEY => {
                // A later optional cannot be positioned without the earlier one.
                if let Some(missing) = omitted {
                    return Err(MetadataError::MissingRequiredAccount(format!(
                        "{instruction}.{missing}"
                    )));
                }
                address
            }
            _ if entry.optional => {
                omitted.get_or_insert(entry.name);
                continue;
            }
            _ => {
                return Err(MetadataError::MissingRequiredAccount(format!(
                    "{instruction}.{}",
                    entry.name
                )))
            }
        };

        let is_signer = match entry.signer {
            SignerRule::Never => false,
            SignerRule::Always => true,
            SignerRule::CallerDeclared => inputs.wants_signer(entry.name),
        };

        accounts.push(AccountMeta {
            pubkey: address,
            is_signer,
            is_writable: entry.writable,
        });
    }

    let payload = wire_codec::encode(args, schema.args)?;
    let mut data = Vec::with_capacity(1 + payload.len());
    data.push(instruction.discriminant());
    data.extend_from_slice(&payload);

    tracing::debug!(
        instruction = %instruction,
        accounts = accounts.len(),
        data_len = data.len(),
        "built metadata instruction"
    );

    Ok(Instruction {
        program_id: config.program_id,
        accounts,
        data,
    })
}

/// Build the instruction a typed argument record belongs to.
pub fn build<A: InstructionArgs>(
    config: &MetadataConfig,
    inputs: &AccountInputs,
    args: &A,
) -> Result<Instruction, MetadataError> {
    build_instruction(config, A::INSTRUCTION, inputs, &args.to_values())
}

/// Split payload bytes into the instruction and its argument values.
///
/// An unassigned discriminant or a payload that does not decode exactly
/// against the instruction's argument list is a malformed payload; a reserved
/// slot is `ReservedInstruction`.
pub fn decode_instruction_data(
    data: &[u8],
) -> Result<(MetadataInstruction, Vec<Value>), MetadataError> {
    let (&tag, rest) = data.split_first().ok_or_else(|| {
        wire_codec::CodecError::MalformedPayload("empty instruction data".into())
    })?;
    let instruction = MetadataInstruction::try_from(tag).map_err(|_| {
        wire_codec::CodecError::MalformedPayload(format!(
            "unknown instruction discriminant {tag} at offset 0"
        ))
    })?;
    let schema = schema(instruction)?;
    let values = wire_codec::decode(rest, schema.args)?;
    Ok((instruction, values))
}

/// Decode payload bytes into a typed argument record, checking the
/// discriminant belongs to `A`.
pub fn decode_args<A: InstructionArgs>(data: &[u8]) -> Result<A, MetadataError> {
    let (instruction, values) = decode_instruction_data(data)?;
    if instruction != A::INSTRUCTION {
        return Err(MetadataError::Codec(wire_codec::CodecError::MalformedPayload(
            format!("expected {} payload, found {instruction}", A::INSTRUCTION),
        )));
    }
    Ok(A::from_values(&values)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::{SetCollectionSizeArgs, UtilizeArgs};
    use crate::config::{RENT_SYSVAR_ID, SYSTEM_PROGRAM_ID, TOKEN_PROGRAM_ID};

    fn key(b: u8) -> [u8; 32] {
        [b; 32]
    }

    fn config() -> MetadataConfig {
        MetadataConfig::default()
    }

    fn sign_metadata_inputs() -> AccountInputs {
        AccountInputs::new()
            .with("metadata", key(1))
            .with("creator", key(2))
    }

    // -- account list --------------------------------------------------------

    #[test]
    fn sign_metadata_accounts_and_data() {
        let ix = build_instruction(
            &config(),
            MetadataInstruction::SignMetadata,
            &sign_metadata_inputs(),
            &[],
        )
        .unwrap();
        assert_eq!(ix.program_id, config().program_id);
        assert_eq!(ix.data, vec![7]);
        assert_eq!(
            ix.accounts,
            vec![
                AccountMeta {
                    pubkey: key(1),
                    is_signer: false,
                    is_writable: true
                },
                AccountMeta {
                    pubkey: key(2),
                    is_signer: true,
                    is_writable: false
                },
            ]
        );
    }

    #[test]
    fn missing_required_account() {
        let inputs = AccountInputs::new().with("metadata", key(1));
        let err = build_instruction(&config(), MetadataInstruction::SignMetadata, &inputs, &[])
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "missing required account: SignMetadata.creator"
        );
    }

    #[test]
    fn unknown_role_rejected() {
        let inputs = sign_metadata_inputs().with("mint", key(3));
        let err = build_instruction(&config(), MetadataInstruction::SignMetadata, &inputs, &[])
            .unwrap_err();
        assert!(matches!(err, MetadataError::UnknownAccount(ref r) if r == "SignMetadata.mint"));
    }

    #[test]
    fn reserved_instruction_rejected() {
        let err = build_instruction(
            &config(),
            MetadataInstruction::DeprecatedMintPrintingTokens,
            &AccountInputs::new(),
            &[],
        )
        .unwrap_err();
        assert!(matches!(err, MetadataError::ReservedInstruction(_)));
    }

    #[test]
    fn required_zero_address_passes_through() {
        let inputs = AccountInputs::new()
            .with("metadata", key(1))
            .with("creator", [0u8; 32]);
        let ix = build_instruction(&config(), MetadataInstruction::SignMetadata, &inputs, &[])
            .unwrap();
        assert_eq!(ix.accounts[1].pubkey, [0u8; 32]);
    }

    #[test]
    fn fixed_accounts_filled_in() {
        let inputs = AccountInputs::new()
            .with("delegate", key(1))
            .with("token_account", key(2))
            .with("edition", key(3))
            .with("mint", key(4));
        let ix = build_instruction(
            &config(),
            MetadataInstruction::FreezeDelegatedAccount,
            &inputs,
            &[],
        )
        .unwrap();
        assert_eq!(ix.accounts.len(), 5);
        assert_eq!(ix.accounts[4].pubkey, TOKEN_PROGRAM_ID);
        assert!(!ix.accounts[4].is_writable);
        assert_eq!(ix.data, vec![26]);
    }

    #[test]
    fn fixed_account_can_be_overridden() {
        let token_2022 = key(0x22);
        let inputs = AccountInputs::new()
            .with("delegate", key(1))
            .with("token_account", key(2))
            .with("edition", key(3))
            .with("mint", key(4))
            .with("token_program", token_2022);
        let ix = build_instruction(
            &config(),
            MetadataInstruction::ThawDelegatedAccount,
            &inputs,
            &[],
        )
        .unwrap();
        assert_eq!(ix.accounts[4].pubkey, token_2022);
        assert_eq!(ix.data, vec![27]);
    }

    #[test]
    fn caller_declared_signer() {
        let base = AccountInputs::new()
            .with("metadata", key(1))
            .with("mint", key(2))
            .with("mint_authority", key(3))
            .with("payer", key(4));
        let args = [
            Value::Struct(vec![
                Value::String("n".into()),
                Value::String("s".into()),
                Value::String("u".into()),
                Value::U16(0),
                Value::none(),
            ]),
            Value::Bool(false),
        ];

        let unsigned = base.clone().with("update_authority", key(5));
        let ix = build_instruction(
            &config(),
            MetadataInstruction::CreateMetadataAccount,
            &unsigned,
            &args,
        )
        .unwrap();
        assert!(!ix.accounts[4].is_signer);

        let signed = base.with_signer("update_authority", key(5));
        let ix = build_instruction(
            &config(),
            MetadataInstruction::CreateMetadataAccount,
            &signed,
            &args,
        )
        .unwrap();
        assert!(ix.accounts[4].is_signer);
        assert_eq!(ix.accounts[5].pubkey, SYSTEM_PROGRAM_ID);
        assert_eq!(ix.accounts[6].pubkey, RENT_SYSVAR_ID);
    }

    #[test]
    fn signer_intent_ignored_for_fixed_rules() {
        let inputs = AccountInputs::new()
            .with_signer("metadata", key(1))
            .with("creator", key(2));
        let ix = build_instruction(&config(), MetadataInstruction::SignMetadata, &inputs, &[])
            .unwrap();
        assert!(!ix.accounts[0].is_signer);
        assert!(ix.accounts[1].is_signer);
    }

    // -- optional tail ---------------------------------------------------------

    fn set_collection_size_inputs() -> AccountInputs {
        AccountInputs::new()
            .with("collection_metadata", key(1))
            .with("collection_authority", key(2))
            .with("collection_mint", key(3))
    }

    #[test]
    fn optional_omitted_when_absent_or_zero() {
        let args = SetCollectionSizeArgs { size: 3 };
        let absent = build(&config(), &set_collection_size_inputs(), &args).unwrap();
        let zero = build(
            &config(),
            &set_collection_size_inputs().with("collection_authority_record", [0u8; 32]),
            &args,
        )
        .unwrap();
        assert_eq!(absent.accounts.len(), 3);
        assert_eq!(absent, zero);
    }

    #[test]
    fn optional_included_at_tail() {
        let inputs = set_collection_size_inputs().with("collection_authority_record", key(9));
        let ix = build(&config(), &inputs, &SetCollectionSizeArgs { size: 3 }).unwrap();
        assert_eq!(ix.accounts.len(), 4);
        assert_eq!(ix.accounts[3].pubkey, key(9));
        assert_eq!(ix.data, vec![34, 3, 0, 0, 0, 0, 0, 0, 0]);
    }

    fn utilize_inputs() -> AccountInputs {
        AccountInputs::new()
            .with("metadata", key(1))
            .with("token_account", key(2))
            .with("mint", key(3))
            .with("use_authority", key(4))
            .with("owner", key(5))
    }

    #[test]
    fn later_optional_without_earlier_is_rejected() {
        let inputs = utilize_inputs().with("burner", key(6));
        let err = build(&config(), &inputs, &UtilizeArgs { number_of_uses: 1 }).unwrap_err();
        assert_eq!(
            err.to_string(),
            "missing required account: Utilize.use_authority_record"
        );
    }

    #[test]
    fn both_optionals_included_in_order() {
        let inputs = utilize_inputs()
            .with("use_authority_record", key(7))
            .with("burner", key(6));
        let ix = build(&config(), &inputs, &UtilizeArgs { number_of_uses: 1 }).unwrap();
        assert_eq!(ix.accounts.len(), 11);
        assert_eq!(ix.accounts[9].pubkey, key(7));
        assert!(ix.accounts[9].is_writable);
        assert_eq!(ix.accounts[10].pubkey, key(6));
    }

    #[test]
    fn fixed_optional_included_by_default() {
        let inputs = AccountInputs::new()
            .with("metadata", key(1))
            .with("mint", key(2))
            .with("mint_authority", key(3))
            .with("payer", key(4))
            .with("update_authority", key(5));
        let ix = build_instruction(
            &config(),
            MetadataInstruction::CreateMetadataAccountV2,
            &inputs,
            &[
                Value::Struct(vec![
                    Value::String(String::new()),
                    Value::String(String::new()),
                    Value::String(String::new()),
                    Value::U16(0),
                    Value::none(),
                    Value::none(),
                    Value::none(),
                ]),
                Value::Bool(true),
            ],
        )
        .unwrap();
        assert_eq!(ix.accounts.len(), 7);
        assert_eq!(ix.accounts[6].pubkey, RENT_SYSVAR_ID);
    }

    // -- payload -------------------------------------------------------------

    #[test]
    fn wrong_argument_shape_is_codec_error() {
        let err = build_instruction(
            &config(),
            MetadataInstruction::SetCollectionSize,
            &set_collection_size_inputs(),
            &[Value::U32(1)],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            MetadataError::Codec(wire_codec::CodecError::UnsupportedField(_))
        ));
    }

    #[test]
    fn decode_rejects_empty_and_unknown() {
        assert!(matches!(
            decode_instruction_data(&[]),
            Err(MetadataError::Codec(_))
        ));
        let err = decode_instruction_data(&[99, 0]).unwrap_err();
        assert!(matches!(
            err,
            MetadataError::Codec(wire_codec::CodecError::MalformedPayload(_))
        ));
        assert!(err.to_string().contains("unknown instruction discriminant 99"));
        assert!(matches!(
            MetadataInstruction::try_from(99),
            Err(MetadataError::UnknownInstruction(99))
        ));
        assert!(matches!(
            decode_instruction_data(&[14]),
            Err(MetadataError::ReservedInstruction(_))
        ));
    }

    #[test]
    fn decode_rejects_trailing_bytes() {
        let err = decode_instruction_data(&[29, 0]).unwrap_err();
        assert!(matches!(
            err,
            MetadataError::Codec(wire_codec::CodecError::MalformedPayload(_))
        ));
    }

    #[test]
    fn decode_args_checks_instruction() {
        let ix = build(
            &config(),
            &set_collection_size_inputs(),
            &SetCollectionSizeArgs { size: 42 },
        )
        .unwrap();
        assert_eq!(
            decode_args::<SetCollectionSizeArgs>(&ix.data).unwrap(),
            SetCollectionSizeArgs { size: 42 }
        );
        assert!(decode_args::<UtilizeArgs>(&ix.data).is_err());
    }

    #[test]
    fn program_id_follows_config() {
        let config = MetadataConfig {
            program_id: key(0xee),
            ..MetadataConfig::default()
        };
        let ix = build_instruction(
            &config,
            MetadataInstruction::SignMetadata,
            &sign_metadata_inputs(),
            &[],
        )
        .unwrap();
        assert_eq!(ix.program_id, key(0xee));
    }

    #[test]
    fn signers_iterates_signing_keys() {
        let ix = build_instruction(
            &config(),
            MetadataInstruction::SignMetadata,
            &sign_metadata_inputs(),
            &[],
        )
        .unwrap();
        assert_eq!(ix.signers().collect::<Vec<_>>(), vec![&key(2)]);
        assert_eq!(ix.discriminant(), Some(7));
    }
}
