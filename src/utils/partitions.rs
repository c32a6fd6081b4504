use log::trace;

/// All ordered ways of writing `total` as a sum of `parts` positive integers.
///
/// This uses an iterative approach to avoid deep recursion on long equations.
pub fn compositions(total: usize, parts: usize) -> Vec<Vec<usize>> {
    trace!("Generating compositions of {} into {} parts", total, parts);

    if parts == 0 || parts > total {
        return vec![];
    }

    if parts == 1 {
        return vec![vec![total]];
    }

    let mut result = Vec::new();

    let mut stack = Vec::new();
    stack.push((Vec::with_capacity(parts), total, parts));

    while let Some((current, remaining, remaining_parts)) = stack.pop() {
        if remaining_parts == 1 {
            let mut composition = current;
            composition.push(remaining);
            result.push(composition);
            continue;
        }

        // Leave at least one unit for every part still to be placed
        let max_part = remaining - (remaining_parts - 1);

        for part in (1..=max_part).rev() {
            let mut next = current.clone();
            next.push(part);
            stack.push((next, remaining - part, remaining_parts - 1));
        }
    }

    trace!("Generated {} compositions", result.len());
    result
}
