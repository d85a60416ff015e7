use std::collections::HashMap;

use crate::ssa::BlockId;

use super::{BinaryKind, Op, Type, Value};

struct Slot {
    op: Op,
    ty: Option<Type>,
    address: Option<u64>,
}

/// Append-only operation arena with use tracking.
///
/// Every construction request appends one operation and returns its handle.
/// Values are pure SSA: an operation's operands are never mutated after
/// construction except through [`IrBuilder::replace_uses`], which reroutes
/// all uses of an eliminated block parameter to its replacement.
#[derive(Default)]
pub struct IrBuilder {
    slots: Vec<Slot>,
    /// For each value, the operations referencing it as an operand.
    users: Vec<Vec<u32>>,
    /// Forwarding pointers left behind by parameter elimination; lookups
    /// resolve through this table so stale local-table entries stay valid.
    aliases: HashMap<Value, Value>,
}

impl IrBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of operations constructed so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// All operations in construction order.
    pub fn ops(&self) -> impl Iterator<Item = (Value, &Op)> {
        self.slots
            .iter()
            .enumerate()
            .map(|(i, slot)| (Value(u32::try_from(i).expect("arena bounded by u32")), &slot.op))
    }

    pub fn iconst(&mut self, ty: Type, literal: i64, address: u64) -> Value {
        self.push(Op::Const { literal }, Some(ty), Some(address))
    }

    pub fn binary(&mut self, kind: BinaryKind, ty: Type, lhs: Value, rhs: Value, address: u64) -> Value {
        let value = self.push(Op::Binary { kind, lhs, rhs }, Some(ty), Some(address));
        self.record_use(lhs, value);
        self.record_use(rhs, value);
        value
    }

    pub fn load_field(&mut self, ty: Type, field_name: &str, field_index: u32, address: u64) -> Value {
        self.push(
            Op::LoadField {
                field_name: field_name.to_owned(),
                field_index,
            },
            Some(ty),
            Some(address),
        )
    }

    pub fn store_field(&mut self, value: Value, field_name: &str, field_index: u32, address: u64) {
        let op = self.push(
            Op::StoreField {
                value,
                field_name: field_name.to_owned(),
                field_index,
            },
            None,
            Some(address),
        );
        self.record_use(value, op);
    }

    pub fn ret(&mut self, value: Value, address: u64) {
        let op = self.push(Op::Return { value }, None, Some(address));
        self.record_use(value, op);
    }

    /// Create a block parameter for `block`. Its type is unknown until the
    /// first operand is appended; `incomplete` marks parameters created in
    /// unsealed blocks.
    pub fn block_param(&mut self, block: BlockId, incomplete: bool) -> Value {
        self.push(
            Op::BlockParam {
                block,
                operands: Vec::new(),
                incomplete,
            },
            None,
            None,
        )
    }

    /// Append `operand` as the value flowing into `param` along the edge
    /// from `pred`. The parameter adopts the type of its first operand.
    pub fn append_param_operand(&mut self, param: Value, pred: BlockId, operand: Value) {
        let operand_ty = self.ty(operand);
        let slot = &mut self.slots[param.index()];
        if slot.ty.is_none() {
            slot.ty = operand_ty;
        }
        match &mut slot.op {
            Op::BlockParam { operands, .. } => operands.push((pred, operand)),
            _ => unreachable!("append_param_operand on non-parameter value"),
        }
        self.record_use(operand, param);
    }

    /// Clear the incomplete flag once every predecessor has contributed.
    pub fn mark_param_complete(&mut self, param: Value) {
        if let Op::BlockParam { incomplete, .. } = &mut self.slots[param.index()].op {
            *incomplete = false;
        }
    }

    #[must_use]
    pub fn param_operands(&self, param: Value) -> &[(BlockId, Value)] {
        match &self.slots[param.index()].op {
            Op::BlockParam { operands, .. } => operands,
            _ => &[],
        }
    }

    #[must_use]
    pub fn is_param(&self, value: Value) -> bool {
        matches!(self.slots[value.index()].op, Op::BlockParam { .. })
    }

    #[must_use]
    pub fn op(&self, value: Value) -> &Op {
        &self.slots[value.index()].op
    }

    /// Semantic type of a value; `None` only for incomplete parameters that
    /// have no operands yet.
    #[must_use]
    pub fn ty(&self, value: Value) -> Option<Type> {
        self.slots[value.index()].ty
    }

    /// Source address of the defining instruction; block parameters carry
    /// none.
    #[must_use]
    pub fn address(&self, value: Value) -> Option<u64> {
        self.slots[value.index()].address
    }

    /// Follow forwarding pointers to the live replacement of `value`.
    #[must_use]
    pub fn resolve(&self, mut value: Value) -> Value {
        while let Some(&next) = self.aliases.get(&value) {
            value = next;
        }
        value
    }

    /// Reroute every use of `old` to `new` and leave a forwarding pointer.
    ///
    /// Returns the parameters among `old`'s former users, so the caller can
    /// re-examine them for triviality.
    pub fn replace_uses(&mut self, old: Value, new: Value) -> Vec<Value> {
        let users = std::mem::take(&mut self.users[old.index()]);
        let mut param_users = Vec::new();
        for &user in &users {
            let user_value = Value(user);
            match &mut self.slots[user_value.index()].op {
                Op::Binary { lhs, rhs, .. } => {
                    if *lhs == old {
                        *lhs = new;
                    }
                    if *rhs == old {
                        *rhs = new;
                    }
                }
                Op::StoreField { value, .. } | Op::Return { value } => {
                    if *value == old {
                        *value = new;
                    }
                }
                Op::BlockParam { operands, .. } => {
                    for (_, operand) in operands.iter_mut() {
                        if *operand == old {
                            *operand = new;
                        }
                    }
                    param_users.push(user_value);
                }
                Op::Const { .. } | Op::LoadField { .. } => {}
            }
            if user_value != new {
                self.record_use(new, user_value);
            }
        }
        self.aliases.insert(old, new);
        param_users
    }

    fn push(&mut self, op: Op, ty: Option<Type>, address: Option<u64>) -> Value {
        let index = u32::try_from(self.slots.len()).expect("IR arena exceeds u32 indices");
        self.slots.push(Slot { op, ty, address });
        self.users.push(Vec::new());
        Value(index)
    }

    fn record_use(&mut self, operand: Value, user: Value) {
        self.users[operand.index()].push(user.0);
    }
}
