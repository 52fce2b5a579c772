//! The progress gate.
//!
//! Module k of an SDG is accessible iff k is the first module, or module k-1
//! has status `done` for the current user. The aggregate SDG percentage is
//! done / total, rounded. Both computations are pure over the position-ordered
//! module list and the user's status map.

use std::collections::HashMap;

use sdglearn_types::module::{Module, ModuleId};
use sdglearn_types::progress::{ModuleAccess, ModuleStatus};

/// Compute the gated module list the player renders.
///
/// `modules` must already be ordered by position. Modules without a stored
/// progress record default to `todo`. When `free_navigation` is set the gate
/// is disabled and everything is unlocked.
pub fn compute_module_access(
    modules: &[Module],
    statuses: &HashMap<ModuleId, ModuleStatus>,
    free_navigation: bool,
) -> Vec<ModuleAccess> {
    let mut previous_done = true; // the first module is always unlocked
    modules
        .iter()
        .map(|module| {
            let status = statuses
                .get(&module.id)
                .copied()
                .unwrap_or(ModuleStatus::Todo);
            let unlocked = free_navigation || previous_done;
            previous_done = status == ModuleStatus::Done;
            ModuleAccess {
                module_id: module.id.clone(),
                title: module.title.clone(),
                position: module.position,
                status,
                unlocked,
            }
        })
        .collect()
}

/// Rounded completion percentage; an SDG with no modules counts as 0.
pub fn percent_complete(done: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    ((done * 100 + total / 2) / total) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sdglearn_types::sdg::SdgId;

    fn make_modules(n: usize) -> Vec<Module> {
        let sdg_id = SdgId::new();
        let now = Utc::now();
        (0..n)
            .map(|i| Module {
                id: ModuleId::new(),
                sdg_id: sdg_id.clone(),
                title: format!("Module {i}"),
                subtitle: String::new(),
                position: i as i64,
                created_at: now,
                updated_at: now,
            })
            .collect()
    }

    #[test]
    fn test_first_module_always_unlocked() {
        let modules = make_modules(3);
        let access = compute_module_access(&modules, &HashMap::new(), false);
        assert!(access[0].unlocked);
        assert!(!access[1].unlocked);
        assert!(!access[2].unlocked);
    }

    #[test]
    fn test_module_unlocks_when_previous_done() {
        let modules = make_modules(3);
        let mut statuses = HashMap::new();
        statuses.insert(modules[0].id.clone(), ModuleStatus::Done);

        let access = compute_module_access(&modules, &statuses, false);
        assert!(access[0].unlocked);
        assert!(access[1].unlocked);
        assert!(!access[2].unlocked);
    }

    #[test]
    fn test_gap_stays_locked() {
        // Done status on module 2 does not unlock module 3 if module 1 is todo.
        let modules = make_modules(4);
        let mut statuses = HashMap::new();
        statuses.insert(modules[2].id.clone(), ModuleStatus::Done);

        let access = compute_module_access(&modules, &statuses, false);
        assert!(!access[1].unlocked);
        assert!(!access[2].unlocked);
        assert!(access[3].unlocked); // its predecessor (module 2) is done
    }

    #[test]
    fn test_free_navigation_unlocks_everything() {
        let modules = make_modules(3);
        let access = compute_module_access(&modules, &HashMap::new(), true);
        assert!(access.iter().all(|a| a.unlocked));
    }

    #[test]
    fn test_missing_progress_defaults_to_todo() {
        let modules = make_modules(2);
        let access = compute_module_access(&modules, &HashMap::new(), false);
        assert_eq!(access[0].status, ModuleStatus::Todo);
        assert_eq!(access[1].status, ModuleStatus::Todo);
    }

    #[test]
    fn test_empty_module_list() {
        let access = compute_module_access(&[], &HashMap::new(), false);
        assert!(access.is_empty());
    }

    #[test]
    fn test_percent_complete() {
        assert_eq!(percent_complete(0, 0), 0);
        assert_eq!(percent_complete(0, 4), 0);
        assert_eq!(percent_complete(1, 4), 25);
        assert_eq!(percent_complete(1, 3), 33);
        assert_eq!(percent_complete(2, 3), 67);
        assert_eq!(percent_complete(4, 4), 100);
    }
}
