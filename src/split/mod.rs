use arrow::record_batch::RecordBatch;

use crate::error::{Result, SplitError};
use crate::io::Dataset;

/// A contiguous run of rows cut from a dataset, in original row order.
///
/// Batches are zero-copy slices of the loaded data; nothing is duplicated
/// or mutated after the cut.
#[derive(Debug)]
pub struct Partition {
    pub index: usize,
    pub batches: Vec<RecordBatch>,
    pub rows: usize,
}

/// Split a dataset into exactly `shards` partitions in original row order.
///
/// Balanced split: the first `total_rows % shards` partitions receive
/// `ceil(total_rows / shards)` rows, the rest the floor, so the largest and
/// smallest partitions differ by at most one row. Concatenating the
/// partitions in index order reconstructs the dataset exactly.
///
/// An empty dataset yields `shards` empty partitions; `shards` larger than
/// the row count leaves the trailing partitions empty.
pub fn split_dataset(dataset: &Dataset, shards: usize) -> Result<Vec<Partition>> {
    if shards == 0 {
        return Err(SplitError::InvalidArgument(
            "shard count must be at least 1".to_string(),
        ));
    }

    let total = dataset.num_rows();
    let base = total / shards;
    let extra = total % shards;

    let source = dataset.batches();
    let mut partitions = Vec::with_capacity(shards);
    let mut batch_idx = 0;
    let mut offset = 0;

    for index in 0..shards {
        let want = base + usize::from(index < extra);
        let mut batches = Vec::new();
        let mut rows = 0;

        // A partition may span several source batches; slice until full.
        while rows < want {
            let batch = &source[batch_idx];
            let available = batch.num_rows() - offset;
            if available == 0 {
                batch_idx += 1;
                offset = 0;
                continue;
            }
            let take = available.min(want - rows);
            batches.push(batch.slice(offset, take));
            rows += take;
            offset += take;
            if offset == batch.num_rows() {
                batch_idx += 1;
                offset = 0;
            }
        }

        partitions.push(Partition {
            index,
            batches,
            rows,
        });
    }

    Ok(partitions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Array, Int64Array};
    use arrow::datatypes::{DataType, Field, Schema};
    use std::sync::Arc;

    fn id_schema() -> Arc<Schema> {
        Arc::new(Schema::new(vec![Field::new("id", DataType::Int64, false)]))
    }

    /// Dataset of sequential ids 0..total, chunked into the given batch sizes.
    fn dataset_of(batch_sizes: &[usize]) -> Dataset {
        let schema = id_schema();
        let mut next = 0i64;
        let mut batches = Vec::new();
        for &size in batch_sizes {
            let ids = Int64Array::from_iter_values(next..next + size as i64);
            batches.push(RecordBatch::try_new(schema.clone(), vec![Arc::new(ids)]).unwrap());
            next += size as i64;
        }
        Dataset::new(schema, batches)
    }

    fn ids_of(partition: &Partition) -> Vec<i64> {
        let mut ids = Vec::new();
        for batch in &partition.batches {
            let col = batch
                .column(0)
                .as_any()
                .downcast_ref::<Int64Array>()
                .unwrap();
            ids.extend(col.iter().map(|v| v.unwrap()));
        }
        ids
    }

    #[test]
    fn test_ten_rows_three_shards() {
        let dataset = dataset_of(&[10]);
        let partitions = split_dataset(&dataset, 3).unwrap();
        let sizes: Vec<usize> = partitions.iter().map(|p| p.rows).collect();
        assert_eq!(sizes, vec![4, 3, 3]);
    }

    #[test]
    fn test_even_split_has_no_extra_rows() {
        let dataset = dataset_of(&[9]);
        let partitions = split_dataset(&dataset, 3).unwrap();
        let sizes: Vec<usize> = partitions.iter().map(|p| p.rows).collect();
        assert_eq!(sizes, vec![3, 3, 3]);
    }

    #[test]
    fn test_single_shard_is_whole_dataset() {
        let dataset = dataset_of(&[7]);
        let partitions = split_dataset(&dataset, 1).unwrap();
        assert_eq!(partitions.len(), 1);
        assert_eq!(partitions[0].rows, 7);
        assert_eq!(ids_of(&partitions[0]), (0..7).collect::<Vec<i64>>());
    }

    #[test]
    fn test_concatenation_reconstructs_dataset() {
        // Partition boundaries land inside source batches here.
        let dataset = dataset_of(&[4, 3, 3]);
        let partitions = split_dataset(&dataset, 2).unwrap();
        let sizes: Vec<usize> = partitions.iter().map(|p| p.rows).collect();
        assert_eq!(sizes, vec![5, 5]);

        let all: Vec<i64> = partitions.iter().flat_map(|p| ids_of(p)).collect();
        assert_eq!(all, (0..10).collect::<Vec<i64>>());
    }

    #[test]
    fn test_extra_rows_go_to_earliest_shards() {
        let dataset = dataset_of(&[17]);
        let partitions = split_dataset(&dataset, 5).unwrap();
        let sizes: Vec<usize> = partitions.iter().map(|p| p.rows).collect();
        assert_eq!(sizes, vec![4, 4, 3, 3, 3]);

        let all: Vec<i64> = partitions.iter().flat_map(|p| ids_of(p)).collect();
        assert_eq!(all, (0..17).collect::<Vec<i64>>());
    }

    #[test]
    fn test_more_shards_than_rows() {
        let dataset = dataset_of(&[2]);
        let partitions = split_dataset(&dataset, 5).unwrap();
        let sizes: Vec<usize> = partitions.iter().map(|p| p.rows).collect();
        assert_eq!(sizes, vec![1, 1, 0, 0, 0]);
    }

    #[test]
    fn test_empty_dataset_gives_empty_shards() {
        let dataset = dataset_of(&[]);
        let partitions = split_dataset(&dataset, 3).unwrap();
        assert_eq!(partitions.len(), 3);
        assert!(partitions.iter().all(|p| p.rows == 0 && p.batches.is_empty()));
    }

    #[test]
    fn test_zero_shards_is_invalid_argument() {
        let dataset = dataset_of(&[4]);
        let err = split_dataset(&dataset, 0).unwrap_err();
        assert!(matches!(err, SplitError::InvalidArgument(_)));
    }

    #[test]
    fn test_slices_preserve_schema() {
        let dataset = dataset_of(&[6]);
        let partitions = split_dataset(&dataset, 4).unwrap();
        for partition in &partitions {
            for batch in &partition.batches {
                assert_eq!(batch.schema().as_ref(), dataset.schema().as_ref());
            }
        }
    }
}
