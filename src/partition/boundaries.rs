use std::collections::BTreeSet;

use crate::error::Result;
use crate::tags::{Frame, TagSet};

/// Collect every frame a clip may start or end on
///
/// The result is `{0, no_frames}` plus every tag start and end, sorted and
/// de-duplicated. Fails if the frame range is empty or any tag is malformed.
pub fn extract_cut_points(tags: &TagSet, no_frames: Frame) -> Result<Vec<Frame>> {
    tags.validate(no_frames)?;

    let mut points = BTreeSet::from([0, no_frames]);
    for tag in tags {
        points.insert(tag.start);
        points.insert(tag.end);
    }

    Ok(points.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{InputError, PartitionError};

    #[test]
    fn test_points_include_range_ends() {
        let tags: TagSet = vec![("cat", 1, 3), ("dog", 4, 7), ("cat", 5, 7)]
            .into_iter()
            .collect();

        let points = extract_cut_points(&tags, 7).unwrap();
        assert_eq!(points, vec![0, 1, 3, 4, 5, 7]);
    }

    #[test]
    fn test_empty_tags_give_whole_range() {
        let points = extract_cut_points(&TagSet::new(), 10).unwrap();
        assert_eq!(points, vec![0, 10]);
    }

    #[test]
    fn test_malformed_tags_fail_fast() {
        let tags: TagSet = vec![("cat", 5, 2)].into_iter().collect();
        assert!(matches!(
            extract_cut_points(&tags, 10),
            Err(PartitionError::InvalidInput(InputError::EmptyInterval { .. }))
        ));

        assert!(extract_cut_points(&TagSet::new(), 0).is_err());
    }
}
