use super::helpers::fetch_entity;
use super::CmdResult;
use crate::error::Result;
use crate::model::Orderable;
use crate::store::DataStore;

pub fn run<E: Orderable, S: DataStore>(store: &S, id: &str) -> Result<CmdResult<E>> {
    let entity: E = fetch_entity(store, id)?;
    Ok(CmdResult::default().with_affected(vec![entity]))
}
