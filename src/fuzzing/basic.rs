use itertools::Itertools;

use super::*;
use crate::test::check_invariants;

qc!(ops_match_model, _ops_match_model);
fn _ops_match_model(ops: Vec<Operation>) -> bool {
    let mut table = PrefixTable::new();
    let mut model = Model::new();

    for op in ops {
        if !apply(&mut table, &mut model, op) {
            return false;
        }
        check_invariants(&table);
    }

    // the final content must agree as well
    table.iter().eq(model.into_iter().sorted())
}

qc!(lookup_matches_model, _lookup_matches_model);
fn _lookup_matches_model((ops, probes): (Vec<Operation>, Vec<u32>)) -> bool {
    let mut table = PrefixTable::new();
    let mut model = Model::new();
    for op in ops {
        apply(&mut table, &mut model, op);
    }

    // probe the edges of every stored range as well as arbitrary addresses
    let edges: Vec<u32> = model
        .iter()
        .filter(|(_, len)| *len > 0)
        .flat_map(|&(base, len)| {
            let top = range_top(base, len);
            [base.wrapping_sub(1), base, top, top.wrapping_add(1)]
        })
        .collect();

    edges
        .into_iter()
        .chain(probes)
        .all(|addr| table.lookup(addr) == model_lookup(&model, addr))
}

qc!(insert_then_remove_is_identity, _insert_then_remove_is_identity);
fn _insert_then_remove_is_identity((ops, fresh): (Vec<Operation>, TestPrefix)) -> bool {
    let mut table = PrefixTable::new();
    let mut model = Model::new();
    for op in ops {
        apply(&mut table, &mut model, op);
    }
    if model.contains(&fresh.entry()) {
        return true;
    }

    let before: Vec<_> = table.iter().collect();
    if table.insert(fresh.0, fresh.1).is_err() || table.remove(fresh.0, fresh.1).is_err() {
        return false;
    }
    check_invariants(&table);
    table.iter().eq(before)
}

qc!(collect_round_trip, _collect_round_trip);
fn _collect_round_trip(ops: Vec<Operation>) -> bool {
    let mut table = PrefixTable::new();
    let mut model = Model::new();
    for op in ops {
        apply(&mut table, &mut model, op);
    }

    let rebuilt: PrefixTable = table.iter().collect::<Vec<_>>().into_iter().collect();
    table == rebuilt && table.len() == rebuilt.len()
}
