use std::collections::HashMap;

use crate::dex::Reg;
use crate::ir::Value;

/// Index of a basic block within its method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub u32);

impl BlockId {
    #[must_use]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// One node of the control-flow graph. Created by the external CFG builder
/// before lifting begins; only the SSA tables mutate afterwards.
///
/// Decoded instructions are owned by the decoder, not the block; the driver
/// feeds them to the translator alongside the block id.
#[derive(Debug, Default)]
pub struct BasicBlock {
    preds: Vec<BlockId>,
    succs: Vec<BlockId>,
    sealed: bool,
    /// Current SSA value per register.
    locals: HashMap<Reg, Value>,
    /// Parameters created while the block was unsealed, completed on seal.
    incomplete_params: HashMap<Reg, Value>,
}

impl BasicBlock {
    #[must_use]
    pub fn preds(&self) -> &[BlockId] {
        &self.preds
    }

    #[must_use]
    pub fn succs(&self) -> &[BlockId] {
        &self.succs
    }

    #[must_use]
    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    pub(crate) fn set_sealed(&mut self) {
        self.sealed = true;
    }

    #[must_use]
    pub(crate) fn local(&self, reg: Reg) -> Option<Value> {
        self.locals.get(&reg).copied()
    }

    pub(crate) fn set_local(&mut self, reg: Reg, value: Value) {
        self.locals.insert(reg, value);
    }

    pub(crate) fn take_incomplete_params(&mut self) -> Vec<(Reg, Value)> {
        self.incomplete_params.drain().collect()
    }

    pub(crate) fn add_incomplete_param(&mut self, reg: Reg, param: Value) {
        self.incomplete_params.insert(reg, param);
    }

    /// Registers with a current definition in this block.
    pub fn defined_registers(&self) -> impl Iterator<Item = Reg> + '_ {
        self.locals.keys().copied()
    }
}

/// A method's block graph. Block 0 is the entry block.
#[derive(Debug, Default)]
pub struct Method {
    name: String,
    register_count: u16,
    blocks: Vec<BasicBlock>,
}

impl Method {
    #[must_use]
    pub fn new(name: &str, register_count: u16) -> Self {
        Self {
            name: name.to_owned(),
            register_count,
            blocks: Vec::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn register_count(&self) -> u16 {
        self.register_count
    }

    #[must_use]
    pub fn entry(&self) -> BlockId {
        BlockId(0)
    }

    pub fn add_block(&mut self) -> BlockId {
        let id = BlockId(u32::try_from(self.blocks.len()).expect("block count exceeds u32"));
        self.blocks.push(BasicBlock::default());
        id
    }

    /// Record a control-flow edge. Must happen before the target is sealed.
    pub fn add_edge(&mut self, from: BlockId, to: BlockId) {
        self.blocks[from.index()].succs.push(to);
        self.blocks[to.index()].preds.push(from);
    }

    #[must_use]
    pub fn block(&self, id: BlockId) -> &BasicBlock {
        &self.blocks[id.index()]
    }

    pub(crate) fn block_mut(&mut self, id: BlockId) -> &mut BasicBlock {
        &mut self.blocks[id.index()]
    }

    #[must_use]
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Current SSA value of `reg` in `block`, if any. Not alias-resolved;
    /// use [`read_register`](super::read_register) during lifting.
    #[must_use]
    pub fn local(&self, block: BlockId, reg: Reg) -> Option<Value> {
        self.blocks[block.index()].local(reg)
    }
}
