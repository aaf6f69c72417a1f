// Path: crates/converter/src/translators/mod.rs
//! Message translators: the compiled-in chain profile plus the dynamic
//! passthrough used for types that only exist at runtime.
//!
//! A profile is a fixed, compiled-in set of translators for the message
//! types the gateway understands structurally. Everything else the node
//! registers is still convertible through [`DynamicTranslator`], which
//! round-trips the raw message bytes through operation metadata instead of
//! decomposing them.

use mesh_api::{MessageTranslator, TranslateContext, TypeCatalog};
use mesh_proto::bank::{MsgSend, MSG_SEND_TYPE_URL};
use mesh_proto::tx::Coin as ProtoCoin;
use mesh_proto::Any;
use mesh_types::protocol::{AccountIdentifier, Amount, Operation, OperationIdentifier};
use mesh_types::{GatewayError, Result};
use prost::Message;
use std::sync::Arc;

pub use mesh_api::dynamic::{DynamicTranslator, META_SIGNER, META_VALUE_B64};

/// Seeds a catalog with the compiled-in profile for lattice-SDK chains.
pub fn default_profile(catalog: &TypeCatalog) {
    catalog.register(Arc::new(BankSendTranslator));
    catalog.register_interface_impl("lattice.base.v1.Msg", MSG_SEND_TYPE_URL);
}

// -----------------------------------------------------------------------------
// Bank transfer
// -----------------------------------------------------------------------------

/// Decomposes a coin transfer into one debit/credit pair per denomination.
pub struct BankSendTranslator;

impl MessageTranslator for BankSendTranslator {
    fn type_url(&self) -> &str {
        MSG_SEND_TYPE_URL
    }

    fn to_operations(
        &self,
        ctx: &TranslateContext,
        msg: &Any,
        status: Option<&str>,
    ) -> Result<Vec<Operation>> {
        let send = decode_send(msg)?;
        let mut ops = Vec::with_capacity(send.amount.len() * 2);
        for coin in &send.amount {
            let debit_pos = ops.len() as u64;
            // debits after the first still link into the group anchor
            let debit_related = if debit_pos == 0 { vec![] } else { vec![0] };
            ops.push(operation(
                debit_pos,
                &debit_related,
                MSG_SEND_TYPE_URL,
                status,
                &send.from_address,
                Amount::new(&coin.amount, true, ctx.currency(&coin.denom)),
            ));
            ops.push(operation(
                debit_pos + 1,
                &[debit_pos],
                MSG_SEND_TYPE_URL,
                status,
                &send.to_address,
                Amount::new(&coin.amount, false, ctx.currency(&coin.denom)),
            ));
        }
        if ops.is_empty() {
            return Err(GatewayError::Converter(
                "transfer message carries no coins".into(),
            ));
        }
        Ok(ops)
    }

    fn to_message(&self, _ctx: &TranslateContext, ops: &[Operation]) -> Result<Any> {
        let mut from: Option<&str> = None;
        let mut to: Option<&str> = None;
        let mut debits: Vec<ProtoCoin> = Vec::new();
        let mut credits: Vec<ProtoCoin> = Vec::new();

        for op in ops {
            let account = op
                .account
                .as_ref()
                .ok_or_else(|| GatewayError::InvalidOperation("transfer operation without account".into()))?;
            let amount = op
                .amount
                .as_ref()
                .ok_or_else(|| GatewayError::InvalidOperation("transfer operation without amount".into()))?;
            let (value, negative) = match amount.value.strip_prefix('-') {
                Some(v) => (v, true),
                None => (amount.value.as_str(), false),
            };
            let slot = if negative { &mut from } else { &mut to };
            if let Some(existing) = *slot {
                if existing != account.address {
                    return Err(GatewayError::InvalidOperation(format!(
                        "transfer operations name two {} accounts: {existing} and {}",
                        if negative { "sender" } else { "receiver" },
                        account.address
                    )));
                }
            } else {
                *slot = Some(account.address.as_str());
            }
            let coin = ProtoCoin {
                denom: amount.currency.symbol.clone(),
                amount: value.to_string(),
            };
            if negative {
                debits.push(coin);
            } else {
                credits.push(coin);
            }
        }

        // every debit must be mirrored by an equal credit
        let mut unmatched = credits.clone();
        for coin in &debits {
            let pos = unmatched
                .iter()
                .position(|c| c == coin)
                .ok_or_else(|| {
                    GatewayError::InvalidOperation(format!(
                        "debit of {}{} has no matching credit",
                        coin.amount, coin.denom
                    ))
                })?;
            unmatched.remove(pos);
        }
        if !unmatched.is_empty() {
            return Err(GatewayError::InvalidOperation(format!(
                "{} credit operation(s) have no matching debit",
                unmatched.len()
            )));
        }

        let send = MsgSend {
            from_address: from
                .ok_or_else(|| GatewayError::InvalidOperation("transfer without a sender".into()))?
                .to_string(),
            to_address: to
                .ok_or_else(|| GatewayError::InvalidOperation("transfer without a receiver".into()))?
                .to_string(),
            amount: credits,
        };
        Ok(send.to_any())
    }

    fn signer_addresses(&self, _ctx: &TranslateContext, msg: &Any) -> Result<Vec<String>> {
        Ok(vec![decode_send(msg)?.from_address])
    }
}

fn decode_send(msg: &Any) -> Result<MsgSend> {
    MsgSend::decode(msg.value.as_slice())
        .map_err(|e| GatewayError::Codec(format!("decoding {MSG_SEND_TYPE_URL}: {e}")))
}

fn operation(
    pos: u64,
    related: &[u64],
    kind: &str,
    status: Option<&str>,
    address: &str,
    amount: Amount,
) -> Operation {
    Operation {
        operation_identifier: OperationIdentifier { index: pos },
        related_operations: if related.is_empty() {
            None
        } else {
            Some(related.iter().map(|&i| OperationIdentifier { index: i }).collect())
        },
        kind: kind.to_string(),
        status: status.map(str::to_string),
        account: Some(AccountIdentifier::new(address)),
        amount: Some(amount),
        metadata: None,
    }
}
