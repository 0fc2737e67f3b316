use yew::prelude::*;

use crate::components::stars::StarRating;
use crate::config::{FLIP_IN_CLASS, VISIBLE_CLASS};
use crate::content::{ParentTestimonial, Review};

pub fn card_classes(revealed: bool) -> Classes {
    let mut classes = classes!("review-card", "perspective-1000");
    if revealed {
        classes.push(VISIBLE_CLASS);
        classes.push(FLIP_IN_CLASS);
    }
    classes
}

#[derive(Properties, PartialEq)]
pub struct ReviewCardProps {
    pub review: Review,
    /// Handed to the scroll reveal once the card is mounted.
    pub card_ref: NodeRef,
    #[prop_or_default]
    pub revealed: bool,
}

#[function_component(ReviewCard)]
pub fn review_card(props: &ReviewCardProps) -> Html {
    let review = &props.review;

    html! {
        <div class={card_classes(props.revealed)} ref={props.card_ref.clone()}>
            <div class="card review-card-inner">
                <div class="card-content">
                    <div class="review-header">
                        <div class="avatar avatar-large">{&review.avatar}</div>
                        <div class="reviewer">
                            <p class="reviewer-name">{&review.name}</p>
                            <p class="reviewer-age">{format!("Age: {}", review.age)}</p>
                            <StarRating rating={review.rating} />
                        </div>
                    </div>
                    <div class="review-body">
                        <p class="review-comment">{&review.comment}</p>
                        <p class="review-date">{&review.date}</p>
                    </div>
                </div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ParentCardProps {
    pub testimonial: ParentTestimonial,
    pub delay_ms: u32,
}

#[function_component(ParentCard)]
pub fn parent_card(props: &ParentCardProps) -> Html {
    let testimonial = &props.testimonial;
    let style = format!("animation-delay: {}ms;", props.delay_ms);

    html! {
        <div class="card parent-card perspective-1000 animate-wave-in" style={style}>
            <div class="card-content">
                <p class="parent-quote">{format!("\"{}\"", testimonial.quote)}</p>
                <div class="parent-footer">
                    <div class="avatar">{&testimonial.avatar}</div>
                    <div class="parent-meta">
                        <p class="reviewer-name">{&testimonial.name}</p>
                        <p class="reviewer-age">{&testimonial.relation}</p>
                    </div>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_card_has_no_visible_classes() {
        let classes = card_classes(false);
        assert!(classes.contains("review-card"));
        assert!(!classes.contains(VISIBLE_CLASS));
        assert!(!classes.contains(FLIP_IN_CLASS));
    }

    #[test]
    fn revealed_card_gets_visible_and_flip_classes() {
        let classes = card_classes(true);
        assert!(classes.contains("review-card"));
        assert!(classes.contains(VISIBLE_CLASS));
        assert!(classes.contains(FLIP_IN_CLASS));
    }
}
