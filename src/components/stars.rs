use yew::prelude::*;

pub const STAR_COUNT: usize = 5;

/// Which of the five indicators are filled for `rating`.
pub fn star_fills(rating: u8) -> [bool; STAR_COUNT] {
    let filled = usize::from(rating).min(STAR_COUNT);
    std::array::from_fn(|i| i < filled)
}

#[derive(Properties, PartialEq)]
pub struct StarRatingProps {
    pub rating: u8,
}

#[function_component(StarRating)]
pub fn star_rating(props: &StarRatingProps) -> Html {
    let label = format!("{} out of {} stars", props.rating.min(STAR_COUNT as u8), STAR_COUNT);

    html! {
        <div class="star-row" role="img" aria-label={label}>
            { for star_fills(props.rating).iter().map(|filled| html! {
                <span class={classes!("star", if *filled { "star-filled" } else { "star-empty" })}>
                    {"★"}
                </span>
            }) }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn fills_exactly_rating_stars() {
        for rating in 1..=5u8 {
            let fills = star_fills(rating);
            assert_eq!(fills.iter().filter(|f| **f).count(), usize::from(rating));
            // filled ones lead
            assert!(fills[..usize::from(rating)].iter().all(|f| *f));
            assert!(fills[usize::from(rating)..].iter().all(|f| !*f));
        }
    }

    #[test]
    fn clamps_out_of_range_ratings() {
        assert_eq!(star_fills(0), [false; STAR_COUNT]);
        assert_eq!(star_fills(9), [true; STAR_COUNT]);
    }
}
