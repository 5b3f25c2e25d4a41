//! item kinds & the inventory seam the simulation talks through
use bevy::log::debug;
use bevy::prelude::Resource;

use crate::constants::HOTBAR_SLOTS;
use crate::tile::TileKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ToolKind {
    Pickaxe,
    Axe,
    Shovel,
}

/// placeable items
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Dirt,
    Stone,
    Wood,
    WoodPlanks,
    StoneBricks,
}

impl BlockKind {
    /// tile written into the world when this block is placed
    pub fn tile(self) -> TileKind {
        match self {
            BlockKind::Dirt => TileKind::Dirt,
            BlockKind::Stone => TileKind::Stone,
            BlockKind::Wood => TileKind::TreeTrunk,
            BlockKind::WoodPlanks => TileKind::WoodPlanks,
            BlockKind::StoneBricks => TileKind::StoneBricks,
        }
    }

    /// item a broken tile turns into once picked up
    pub fn from_broken(tile: TileKind) -> Option<Self> {
        match tile {
            TileKind::Dirt | TileKind::Grass => Some(BlockKind::Dirt),
            TileKind::Stone => Some(BlockKind::Stone),
            TileKind::TreeTrunk => Some(BlockKind::Wood),
            TileKind::WoodPlanks => Some(BlockKind::WoodPlanks),
            TileKind::StoneBricks => Some(BlockKind::StoneBricks),
            TileKind::Air | TileKind::Water | TileKind::Leaves => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Tool(ToolKind),
    Block(BlockKind),
}

/// what the simulation needs from whoever owns the player's items
pub trait Inventory {
    fn selected_tool(&self) -> Option<ToolKind>;
    fn selected_block(&self) -> Option<BlockKind>;
    fn consume_selected_block_one(&mut self);
    fn add_item(&mut self, item: ItemKind, count: u32);
}

/* ===========================================================
   hotbar – minimal inventory used by the game binary
   =========================================================== */
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ItemStack {
    pub item: ItemKind,
    pub count: u32,
}

#[derive(Resource, Clone, Debug)]
pub struct Hotbar {
    slots: [Option<ItemStack>; HOTBAR_SLOTS],
    selected: usize,
}

impl Default for Hotbar {
    /// starter kit: pickaxe, axe & shovel in the first three slots
    fn default() -> Self {
        let mut bar = Self::empty();
        for (i, tool) in [ToolKind::Pickaxe, ToolKind::Axe, ToolKind::Shovel]
            .into_iter()
            .enumerate()
        {
            bar.slots[i] = Some(ItemStack { item: ItemKind::Tool(tool), count: 1 });
        }
        bar
    }
}

impl Hotbar {
    pub fn empty() -> Self {
        Self {
            slots: [None; HOTBAR_SLOTS],
            selected: 0,
        }
    }

    /// panics on an out‑of‑range slot; callers map keys 1..=9
    pub fn select(&mut self, slot: usize) {
        assert!(slot < HOTBAR_SLOTS, "hotbar slot {slot} out of range");
        self.selected = slot;
    }

    #[inline]
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    #[inline]
    pub fn slot(&self, slot: usize) -> Option<ItemStack> {
        self.slots[slot]
    }

    #[inline]
    pub fn selected(&self) -> Option<ItemStack> {
        self.slots[self.selected]
    }

    pub fn count_of(&self, item: ItemKind) -> u32 {
        self.slots
            .iter()
            .flatten()
            .filter(|s| s.item == item)
            .map(|s| s.count)
            .sum()
    }
}

impl Inventory for Hotbar {
    fn selected_tool(&self) -> Option<ToolKind> {
        match self.selected()?.item {
            ItemKind::Tool(tool) => Some(tool),
            ItemKind::Block(_) => None,
        }
    }

    fn selected_block(&self) -> Option<BlockKind> {
        match self.selected()?.item {
            ItemKind::Block(block) => Some(block),
            ItemKind::Tool(_) => None,
        }
    }

    fn consume_selected_block_one(&mut self) {
        let slot = &mut self.slots[self.selected];
        if let Some(stack) = slot {
            if matches!(stack.item, ItemKind::Block(_)) {
                stack.count -= 1;
                if stack.count == 0 {
                    *slot = None;
                }
            }
        }
    }

    /// stack onto a matching slot, else the first free one; overflow is lost
    fn add_item(&mut self, item: ItemKind, count: u32) {
        if count == 0 {
            return;
        }
        if let Some(stack) = self.slots.iter_mut().flatten().find(|s| s.item == item) {
            stack.count += count;
            return;
        }
        match self.slots.iter_mut().find(|s| s.is_none()) {
            Some(free) => *free = Some(ItemStack { item, count }),
            None => debug!(?item, count, "hotbar full, item discarded"),
        }
    }
}
