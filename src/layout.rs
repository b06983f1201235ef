//! Per-variant offsets and list geometry for the Gen 1 and Gen 2 layouts.
//!
//! None of these lists carry length fields, so every constant here is part of
//! the variant's contract: a wrong stride shifts every later sub-region.

/// Geometry of one fixed-capacity creature list.
///
/// The list is laid out as: count byte, `capacity` species bytes plus one
/// terminator, `capacity` records of `stride` bytes, then `capacity` trainer
/// names and `capacity` nicknames of `text_width + 1` bytes each.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListLayout {
    pub capacity: usize,
    pub stride: usize,
    pub text_width: usize,
}

impl ListLayout {
    pub const fn new(capacity: usize, stride: usize, text_width: usize) -> Self {
        Self {
            capacity,
            stride,
            text_width,
        }
    }

    pub fn species_offset(&self) -> usize {
        1
    }

    pub fn records_offset(&self) -> usize {
        self.species_offset() + self.capacity + 1
    }

    pub fn trainer_names_offset(&self) -> usize {
        self.records_offset() + self.capacity * self.stride
    }

    pub fn nicknames_offset(&self) -> usize {
        self.trainer_names_offset() + self.capacity * self.text_field_size()
    }

    /// Total bytes covered by the list.
    pub fn span(&self) -> usize {
        self.nicknames_offset() + self.capacity * self.text_field_size()
    }

    pub fn text_field_size(&self) -> usize {
        self.text_width + 1
    }
}

/// The live copy of the selected box, which takes precedence over its banked
/// copy.
#[derive(Clone, Copy, Debug)]
pub struct CurrentBox {
    pub offset: usize,
    /// Low seven bits select the box.
    pub index_offset: usize,
    /// Bit 7 of the selector is set once the banked boxes have been written
    /// for the first time. Without it the banks are always read.
    pub tracks_bank_writes: bool,
}

#[derive(Clone, Copy, Debug)]
pub struct BoxStorage {
    pub offsets: &'static [usize],
    pub list: ListLayout,
    pub current: Option<CurrentBox>,
}

#[derive(Clone, Copy, Debug)]
pub struct TrainerLayout {
    pub name_offset: usize,
    pub name_width: usize,
    /// Big-endian u16.
    pub id_offset: usize,
}

#[derive(Clone, Copy, Debug)]
pub struct VariantLayout {
    pub trainer: TrainerLayout,
    pub party_offset: usize,
    pub party: ListLayout,
    pub boxes: BoxStorage,
}

const GEN1_PARTY: ListLayout = ListLayout::new(6, 44, 10);
const GEN1_BOX: ListLayout = ListLayout::new(20, 33, 10);
const GEN2_PARTY: ListLayout = ListLayout::new(6, 48, 10);
const GEN2_BOX: ListLayout = ListLayout::new(20, 32, 10);

const GEN1_BOX_OFFSETS: [usize; 12] = [
    0x4000, 0x4462, 0x48c4, 0x4d26, 0x5188, 0x55ea, 0x6000, 0x6462, 0x68c4, 0x6d26, 0x7188,
    0x75ea,
];

const GEN2_BOX_OFFSETS: [usize; 14] = [
    0x4000, 0x4450, 0x48a0, 0x4cf0, 0x5140, 0x5590, 0x59e0, 0x6000, 0x6450, 0x68a0, 0x6cf0,
    0x7140, 0x7590, 0x79e0,
];

const GEN1_TRAINER: TrainerLayout = TrainerLayout {
    name_offset: 0x2598,
    name_width: 7,
    id_offset: 0x2605,
};

const GEN2_TRAINER: TrainerLayout = TrainerLayout {
    name_offset: 0x200b,
    name_width: 7,
    id_offset: 0x2009,
};

const fn gen2_boxes(index_offset: usize, offset: usize) -> BoxStorage {
    BoxStorage {
        offsets: &GEN2_BOX_OFFSETS,
        list: GEN2_BOX,
        current: Some(CurrentBox {
            offset,
            index_offset,
            tracks_bank_writes: false,
        }),
    }
}

pub static RED_BLUE_YELLOW_INTERNATIONAL: VariantLayout = VariantLayout {
    trainer: GEN1_TRAINER,
    party_offset: 0x2f2c,
    party: GEN1_PARTY,
    boxes: BoxStorage {
        offsets: &GEN1_BOX_OFFSETS,
        list: GEN1_BOX,
        current: Some(CurrentBox {
            offset: 0x30c0,
            index_offset: 0x284c,
            tracks_bank_writes: true,
        }),
    },
};

pub static GOLD_SILVER_INTERNATIONAL: VariantLayout = VariantLayout {
    trainer: GEN2_TRAINER,
    party_offset: 0x288a,
    party: GEN2_PARTY,
    boxes: gen2_boxes(0x2724, 0x2d6c),
};

pub static CRYSTAL_INTERNATIONAL: VariantLayout = VariantLayout {
    trainer: GEN2_TRAINER,
    party_offset: 0x2865,
    party: GEN2_PARTY,
    boxes: gen2_boxes(0x2700, 0x2d10),
};

pub static CRYSTAL_251: VariantLayout = VariantLayout {
    trainer: GEN2_TRAINER,
    party_offset: 0x286a,
    party: GEN2_PARTY,
    boxes: gen2_boxes(0x2705, 0x2d15),
};
