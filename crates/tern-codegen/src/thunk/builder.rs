// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! ThunkBuilder - helper for CFG construction during emission.

use super::{BlockId, LocalId, LocalTy, ThunkBlock, ThunkFunction, ThunkLocal, ThunkStmt, ThunkTerminator};

pub struct ThunkBuilder {
    function: ThunkFunction,
    current_block: BlockId,
    next_local_id: u32,
    next_block_id: u32,
}

impl ThunkBuilder {
    pub fn new(name: String, descriptor: String) -> Self {
        let entry_block = BlockId(0);
        let function = ThunkFunction {
            name,
            descriptor,
            params: Vec::new(),
            locals: Vec::new(),
            blocks: vec![ThunkBlock {
                id: entry_block,
                statements: Vec::new(),
                terminator: ThunkTerminator::Unreachable,
            }],
            entry_block,
        };

        Self {
            function,
            current_block: entry_block,
            next_local_id: 0,
            next_block_id: 1,
        }
    }

    pub fn create_block(&mut self) -> BlockId {
        let id = BlockId(self.next_block_id);
        self.next_block_id += 1;
        self.function.blocks.push(ThunkBlock {
            id,
            statements: Vec::new(),
            terminator: ThunkTerminator::Unreachable,
        });
        id
    }

    pub fn switch_to_block(&mut self, block: BlockId) {
        self.current_block = block;
    }

    pub fn alloc_temp(&mut self, ty: LocalTy) -> LocalId {
        let id = LocalId(self.next_local_id);
        self.next_local_id += 1;
        self.function.locals.push(ThunkLocal {
            id,
            name: None,
            ty,
            is_param: false,
        });
        id
    }

    pub fn add_param(&mut self, name: String, ty: LocalTy) -> LocalId {
        let id = LocalId(self.next_local_id);
        self.next_local_id += 1;
        let local = ThunkLocal {
            id,
            name: Some(name),
            ty,
            is_param: true,
        };
        self.function.params.push(local.clone());
        self.function.locals.push(local);
        id
    }

    pub fn push_stmt(&mut self, stmt: ThunkStmt) {
        let block = &mut self.function.blocks[self.current_block.0 as usize];
        block.statements.push(stmt);
    }

    pub fn terminate(&mut self, term: ThunkTerminator) {
        let block = &mut self.function.blocks[self.current_block.0 as usize];
        block.terminator = term;
    }

    pub fn finish(self) -> ThunkFunction {
        self.function
    }
}
