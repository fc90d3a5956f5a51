use crate::contact::Contact;
use crate::export::ExportError;

/// Split the contact list into consecutive groups of at most `batch_size`
/// contacts, preserving order. Every group is full except possibly the
/// last; an empty list partitions into no groups at all.
pub fn partition(contacts: &[Contact], batch_size: usize) -> Result<Vec<&[Contact]>, ExportError> {
    if batch_size == 0 {
        return Err(ExportError::InvalidBatchSize);
    }
    Ok(contacts.chunks(batch_size).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contacts(count: usize) -> Vec<Contact> {
        (0..count)
            .map(|i| Contact {
                name: format!("Contact {i}"),
                number: format!("{i:010}"),
            })
            .collect()
    }

    #[test]
    fn test_partition_round_trip() {
        let list = contacts(250);
        let groups = partition(&list, 100).unwrap();

        let rebuilt: Vec<Contact> = groups.iter().flat_map(|g| g.iter().cloned()).collect();
        assert_eq!(rebuilt, list);
    }

    #[test]
    fn test_partition_group_sizes() {
        let list = contacts(250);
        let groups = partition(&list, 100).unwrap();

        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].len(), 100);
        assert_eq!(groups[1].len(), 100);
        assert_eq!(groups[2].len(), 50);
    }

    #[test]
    fn test_partition_exact_multiple() {
        let list = contacts(200);
        let groups = partition(&list, 100).unwrap();

        assert_eq!(groups.len(), 2);
        assert!(groups.iter().all(|g| g.len() == 100));
    }

    #[test]
    fn test_partition_empty_list() {
        let groups = partition(&[], 100).unwrap();
        assert!(groups.is_empty());
    }

    #[test]
    fn test_partition_batch_count_is_ceiling() {
        for (total, batch_size) in [(1, 100), (99, 100), (100, 100), (101, 100), (7, 3)] {
            let list = contacts(total);
            let groups = partition(&list, batch_size).unwrap();
            assert_eq!(groups.len(), total.div_ceil(batch_size));
        }
    }

    #[test]
    fn test_partition_rejects_zero_batch_size() {
        let list = contacts(5);
        assert!(matches!(
            partition(&list, 0),
            Err(ExportError::InvalidBatchSize)
        ));
    }
}
