use std::collections::{BTreeMap, HashMap};

pub type Word = i16;
pub type Stack = Vec<Word>;
pub type StackSlice<'a> = &'a [Word];

pub type Variables = BTreeMap<String, Word>;
pub type Labels = HashMap<String, usize>;

// -1 means halted
pub type Cursor = isize;

pub type Data = Vec<u8>;
pub type DataSlice<'a> = &'a [u8];
