//! Typed argument records for instructions that carry a payload.
//!
//! Each record knows its instruction and converts to the ordered field
//! values the schema table declares for it. Instructions without a payload
//! are built straight through [`crate::build_instruction`] with no values.

use serde::{Deserialize, Serialize};
use wire_codec::{CodecError, Value};

use crate::instruction::MetadataInstruction;
use crate::types::{CollectionDetails, Data, DataV2, WireValue};

/// A payload record bound to exactly one instruction.
pub trait InstructionArgs: Sized {
    const INSTRUCTION: MetadataInstruction;

    /// Field values in schema order, discriminant excluded.
    fn to_values(&self) -> Vec<Value>;

    fn from_values(values: &[Value]) -> Result<Self, CodecError>;
}

fn expect_arity(values: &[Value], ix: MetadataInstruction, n: usize) -> Result<(), CodecError> {
    if values.len() != n {
        return Err(CodecError::UnsupportedField(format!(
            "{ix}: expected {n} argument values, got {}",
            values.len()
        )));
    }
    Ok(())
}

fn next_arg<T: WireValue>(
    it: &mut std::slice::Iter<'_, Value>,
    name: &str,
) -> Result<T, CodecError> {
    let value = it
        .next()
        .ok_or_else(|| CodecError::UnsupportedField(format!("missing argument {name}")))?;
    T::from_value(value)
}

/// Implements [`InstructionArgs`] for a record whose fields map one to one,
/// in declaration order, onto the instruction's argument list.
macro_rules! instruction_args {
    ($ty:ident => $ix:ident { $($field:ident),+ $(,)? }) => {
        impl InstructionArgs for $ty {
            const INSTRUCTION: MetadataInstruction = MetadataInstruction::$ix;

            fn to_values(&self) -> Vec<Value> {
                vec![$(self.$field.to_value()),+]
            }

            fn from_values(values: &[Value]) -> Result<Self, CodecError> {
                let expected = [$(stringify!($field)),+].len();
                expect_arity(values, Self::INSTRUCTION, expected)?;
                let mut it = values.iter();
                Ok(Self {
                    $($field: next_arg(&mut it, stringify!($field))?,)+
                })
            }
        }
    };
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateMetadataAccountArgs {
    pub data: Data,
    pub is_mutable: bool,
}
instruction_args!(CreateMetadataAccountArgs => CreateMetadataAccount { data, is_mutable });

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateMetadataAccountArgsV2 {
    pub data: DataV2,
    pub is_mutable: bool,
}
instruction_args!(CreateMetadataAccountArgsV2 => CreateMetadataAccountV2 { data, is_mutable });

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateMetadataAccountArgsV3 {
    pub data: DataV2,
    pub is_mutable: bool,
    /// `Some` marks the new metadata as a sized collection parent.
    pub collection_details: Option<CollectionDetails>,
}
instruction_args!(CreateMetadataAccountArgsV3 => CreateMetadataAccountV3 {
    data,
    is_mutable,
    collection_details,
});

/// Every field is optional; `None` leaves the on-chain value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateMetadataAccountArgs {
    pub data: Option<Data>,
    pub update_authority: Option<[u8; 32]>,
    pub primary_sale_happened: Option<bool>,
}
instruction_args!(UpdateMetadataAccountArgs => UpdateMetadataAccount {
    data,
    update_authority,
    primary_sale_happened,
});

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateMetadataAccountArgsV2 {
    pub data: Option<DataV2>,
    pub update_authority: Option<[u8; 32]>,
    pub primary_sale_happened: Option<bool>,
    pub is_mutable: Option<bool>,
}
instruction_args!(UpdateMetadataAccountArgsV2 => UpdateMetadataAccountV2 {
    data,
    update_authority,
    primary_sale_happened,
    is_mutable,
});

/// Arguments of `CreateMasterEditionV3`. `None` means unlimited prints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateMasterEditionArgs {
    pub max_supply: Option<u64>,
}
instruction_args!(CreateMasterEditionArgs => CreateMasterEditionV3 { max_supply });

/// Arguments of the original `CreateMasterEdition` slot. Same layout as
/// [`CreateMasterEditionArgs`], different discriminant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyCreateMasterEditionArgs {
    pub max_supply: Option<u64>,
}
instruction_args!(LegacyCreateMasterEditionArgs => CreateMasterEdition { max_supply });

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintNewEditionFromMasterEditionViaTokenArgs {
    pub edition: u64,
}
instruction_args!(MintNewEditionFromMasterEditionViaTokenArgs => MintNewEditionFromMasterEditionViaToken {
    edition,
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtilizeArgs {
    pub number_of_uses: u64,
}
instruction_args!(UtilizeArgs => Utilize { number_of_uses });

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApproveUseAuthorityArgs {
    pub number_of_uses: u64,
}
instruction_args!(ApproveUseAuthorityArgs => ApproveUseAuthority { number_of_uses });

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetCollectionSizeArgs {
    pub size: u64,
}
instruction_args!(SetCollectionSizeArgs => SetCollectionSize { size });
