use contig_core::ErrorKind;
use contig_handle::{BackingKind, Handle, HandleError};
use contig_test_utils::{UnpinnableManager, VecManager};

#[test]
fn manager_backed_handle_views_region() {
    let handle = Handle::from_manager(VecManager::new((0..8).collect::<Vec<u32>>()));
    assert_eq!(handle.backing_kind(), BackingKind::Manager);
    assert_eq!(handle.len(), 8);

    let window = handle.slice(2, 3).unwrap();
    let view = window.as_view().unwrap();
    assert_eq!(view.to_vec(), vec![2, 3, 4]);
    assert_eq!(view.byte_offset(), 8);
}

#[test]
fn manager_pin_is_delegated_and_balanced() {
    let manager = VecManager::new(vec![1u8; 16]);
    let counters = manager.counters();
    let handle = Handle::from_manager(manager);

    let pin = handle.slice_from(5).unwrap().pin().unwrap();
    assert_eq!(counters.pins(), 1);
    assert_eq!(counters.last_index(), 5);
    assert_eq!(pin.len(), 11);
    assert_eq!(handle.pin_count(), 1);

    pin.release();
    assert_eq!(counters.unpins(), 1);
    assert_eq!(counters.outstanding(), 0);
    assert_eq!(handle.pin_count(), 0);
}

#[test]
fn manager_pin_released_on_early_return() {
    fn interop(handle: &Handle<u8>) -> Result<usize, HandleError> {
        let pin = handle.pin()?;
        if pin.len() > 4 {
            return Ok(pin.len());
        }
        Ok(0)
    }

    let manager = VecManager::new(vec![0u8; 8]);
    let counters = manager.counters();
    let handle = Handle::from_manager(manager);
    assert_eq!(interop(&handle).unwrap(), 8);
    assert_eq!(counters.outstanding(), 0);
}

#[test]
fn unpinnable_manager_refuses_pin() {
    let handle = Handle::from_manager(UnpinnableManager::new(vec![1i64, 2, 3]));
    let err = handle.pin().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidOperation);
    assert!(matches!(err, HandleError::NotPinnable { .. }));
    assert_eq!(handle.pin_count(), 0);

    // Views still work without pinning.
    assert_eq!(handle.to_vec().unwrap(), vec![1, 2, 3]);
}

#[test]
fn manager_region_writes_are_shared() {
    let handle = Handle::from_manager(VecManager::new(vec![0i32; 4]));
    let other = handle.clone();
    handle.slice(1, 2).unwrap().as_view().unwrap().fill(9);
    assert_eq!(other.to_vec().unwrap(), vec![0, 9, 9, 0]);
}

#[test]
fn manager_borrow_conflicts_are_reported() {
    let handle = Handle::from_manager(VecManager::new(vec![0u16; 4]));
    let guard = handle.as_view().unwrap();
    assert_eq!(
        handle.as_read_only_view().unwrap_err(),
        HandleError::Borrowed { exclusive: false }
    );
    drop(guard);
    assert!(handle.as_read_only_view().is_ok());
}
