use std::collections::BTreeSet;
use std::rc::Rc;

use log::{debug, error, warn};
use yew::prelude::*;

use crate::components::review_card::{ParentCard, ReviewCard};
use crate::components::stars::StarRating;
use crate::config::RevealConfig;
use crate::content::{average_rating, format_average, ReviewsContent};
use crate::reveal::controller::TargetId;
use crate::reveal::observer::ScrollReveal;

/// Indices of review cards whose reveal signal has fired.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RevealedCards(BTreeSet<usize>);

impl RevealedCards {
    pub fn contains(&self, index: usize) -> bool {
        self.0.contains(&index)
    }
}

impl Reducible for RevealedCards {
    type Action = TargetId;

    fn reduce(self: Rc<Self>, action: TargetId) -> Rc<Self> {
        if self.contains(action.0) {
            return self;
        }
        let mut next = (*self).clone();
        next.0.insert(action.0);
        Rc::new(next)
    }
}

fn load_content() -> ReviewsContent {
    match ReviewsContent::load() {
        Ok(content) => content,
        Err(e) => {
            error!("Failed to load reviews: {}", e);
            ReviewsContent::default()
        }
    }
}

#[function_component(Reviews)]
pub fn reviews() -> Html {
    let is_loaded = use_state(|| false);
    let reveal_armed = use_state(|| false);
    let revealed = use_reducer(RevealedCards::default);
    let content = use_memo(|_| load_content(), ());
    let card_refs = use_memo(
        |count| (0..*count).map(|_| NodeRef::default()).collect::<Vec<_>>(),
        content.reviews.len(),
    );

    // Mount: start the hero animation and wire the cards to the scroll reveal.
    // The returned cleanup drops the reveal, which cancels pending timers.
    {
        let is_loaded = is_loaded.clone();
        let reveal_armed = reveal_armed.clone();
        let revealed = revealed.clone();
        let card_refs = card_refs.clone();
        use_effect_with_deps(
            move |_| {
                if let Some(window) = web_sys::window() {
                    window.scroll_to_with_x_and_y(0.0, 0.0);
                }
                is_loaded.set(true);

                let on_reveal = Callback::from(move |id: TargetId| revealed.dispatch(id));
                let reveal = match ScrollReveal::attach(&card_refs, RevealConfig::default(), on_reveal) {
                    Ok(reveal) => {
                        reveal_armed.set(true);
                        Some(reveal)
                    }
                    Err(e) => {
                        // Cards stay in their plain, readable state.
                        warn!("Scroll reveal disabled: {}", e);
                        None
                    }
                };

                move || {
                    if reveal.is_some() {
                        debug!("Detaching scroll reveal");
                    }
                    drop(reveal);
                }
            },
            (),
        );
    }

    let average = format_average(average_rating(&content.reviews));
    let wave_class = if *is_loaded { "animate-wave-in" } else { "pre-load" };

    html! {
        <div class="reviews-page">
            <section class="reviews-hero">
                <div class="hero-wave">
                    <svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 1440 320" preserveAspectRatio="none">
                        <path d="M0,288L48,272C96,256,192,224,288,197.3C384,171,480,149,576,165.3C672,181,768,235,864,250.7C960,267,1056,245,1152,224C1248,203,1344,181,1392,170.7L1440,160L1440,320L1392,320C1344,320,1248,320,1152,320C1056,320,960,320,864,320C768,320,672,320,576,320C480,320,384,320,288,320C192,320,96,320,48,320L0,320Z"></path>
                    </svg>
                </div>
                <div class={classes!("hero-inner", wave_class)}>
                    <h1 class="animate-float">{"What Our Users Say"}</h1>
                    <p class="hero-subtitle animate-float" style="animation-delay: 0.2s;">
                        {"See how Clockify has helped teens just like you master time management and achieve their goals."}
                    </p>
                    <div class="hero-rating animate-float" style="animation-delay: 0.4s;">
                        <StarRating rating={5} />
                        <p class="hero-average">{format!("{} average rating", average)}</p>
                    </div>
                </div>
            </section>

            <section class="reviews-section">
                <div class={classes!("reviews-grid", (*reveal_armed).then(|| "reveal-armed"))}>
                    {
                        for content.reviews.iter().zip(card_refs.iter()).enumerate().map(|(index, (review, card_ref))| html! {
                            <ReviewCard
                                key={review.id.to_string()}
                                review={review.clone()}
                                card_ref={card_ref.clone()}
                                revealed={revealed.contains(index)}
                            />
                        })
                    }
                </div>
            </section>

            <section class="parents-section">
                <div class={classes!("parents-inner", wave_class)} style="animation-delay: 0.5s;">
                    <h2>{"From Parents"}</h2>
                    <div class="parents-grid">
                        {
                            for content.parents.iter().enumerate().map(|(index, testimonial)| html! {
                                <ParentCard
                                    key={testimonial.name.clone()}
                                    testimonial={testimonial.clone()}
                                    delay_ms={700 + 200 * index as u32}
                                />
                            })
                        }
                    </div>
                </div>
            </section>

            <style>
                {r#"
                .reviews-page {
                    padding-top: 74px;
                    min-height: 100vh;
                    display: flex;
                    flex-direction: column;
                    background: #ffffff;
                    color: #1f2937;
                }
                .reviews-hero {
                    position: relative;
                    overflow: hidden;
                    padding: 3rem 1rem 5rem;
                    background: linear-gradient(to right, #1e90ff, #5ab2ff);
                    color: #ffffff;
                    text-align: center;
                }
                .hero-wave {
                    position: absolute;
                    bottom: 0;
                    left: 0;
                    width: 100%;
                }
                .hero-wave svg {
                    display: block;
                    width: 100%;
                    height: 4rem;
                    fill: #ffffff;
                }
                .hero-inner {
                    position: relative;
                    z-index: 1;
                    max-width: 80rem;
                    margin: 0 auto;
                }
                .hero-inner h1 {
                    font-size: 2.25rem;
                    font-weight: 700;
                    margin-bottom: 1rem;
                }
                .hero-subtitle {
                    font-size: 1.25rem;
                    max-width: 48rem;
                    margin: 0 auto;
                }
                .hero-rating {
                    display: flex;
                    align-items: center;
                    justify-content: center;
                    gap: 0.5rem;
                    margin-top: 1.5rem;
                }
                .hero-average {
                    font-size: 1.25rem;
                    font-weight: 600;
                }
                .star-row {
                    display: flex;
                }
                .star {
                    font-size: 1rem;
                    line-height: 1;
                }
                .star-filled {
                    color: #facc15;
                }
                .star-empty {
                    color: #d1d5db;
                }
                .reviews-section {
                    position: relative;
                    z-index: 1;
                    padding: 3rem 1rem;
                }
                .reviews-grid {
                    display: grid;
                    grid-template-columns: repeat(3, minmax(0, 1fr));
                    gap: 1.5rem;
                    max-width: 80rem;
                    margin: 0 auto;
                }
                .perspective-1000 {
                    perspective: 1000px;
                }
                .card {
                    height: 100%;
                    background: #ffffff;
                    border: 1px solid #e5e7eb;
                    border-radius: 12px;
                    transition: box-shadow 0.3s ease, transform 0.3s ease;
                }
                .card:hover {
                    box-shadow: 0 4px 12px rgba(0, 0, 0, 0.08);
                    transform: translateY(-4px);
                }
                .card-content {
                    padding: 1.5rem;
                }
                .review-header,
                .parent-footer {
                    display: flex;
                    align-items: flex-start;
                    gap: 1rem;
                }
                .parent-footer {
                    align-items: center;
                    margin-top: 1rem;
                }
                .avatar {
                    display: flex;
                    align-items: center;
                    justify-content: center;
                    flex-shrink: 0;
                    width: 2.5rem;
                    height: 2.5rem;
                    border-radius: 50%;
                    background: #1e90ff;
                    color: #ffffff;
                    font-weight: 600;
                }
                .avatar-large {
                    width: 3rem;
                    height: 3rem;
                    background: #5ab2ff;
                    border: 2px solid #1e90ff;
                }
                .reviewer-name {
                    font-weight: 600;
                }
                .reviewer-age,
                .review-date {
                    font-size: 0.875rem;
                    color: #6b7280;
                }
                .review-body {
                    margin-top: 1rem;
                }
                .review-comment {
                    color: #374151;
                }
                .review-date {
                    margin-top: 0.5rem;
                }
                /* Cards are only hidden once the observer is attached. */
                .reveal-armed .review-card {
                    opacity: 0;
                    transform: rotateY(-90deg);
                }
                .reveal-armed .review-card.review-card-visible {
                    opacity: 1;
                    transform: none;
                }
                .animate-flip-in {
                    animation: flipIn 0.7s ease-out both;
                }
                @keyframes flipIn {
                    from { opacity: 0; transform: rotateY(-90deg); }
                    to { opacity: 1; transform: rotateY(0); }
                }
                .parents-section {
                    position: relative;
                    overflow: hidden;
                    padding: 3rem 1rem;
                    background: #f3f4f6;
                }
                .parents-inner {
                    max-width: 80rem;
                    margin: 0 auto;
                }
                .parents-inner h2 {
                    font-size: 1.5rem;
                    font-weight: 700;
                    text-align: center;
                    margin-bottom: 2rem;
                }
                .parents-grid {
                    display: grid;
                    grid-template-columns: repeat(2, minmax(0, 1fr));
                    gap: 1.5rem;
                }
                .parent-card:hover {
                    transform: scale(1.02);
                }
                .parent-quote {
                    font-style: italic;
                    color: #374151;
                }
                .pre-load {
                    opacity: 0;
                }
                .animate-wave-in {
                    animation: waveIn 0.8s ease-out both;
                }
                @keyframes waveIn {
                    from { opacity: 0; transform: translateY(24px) skewY(2deg); }
                    to { opacity: 1; transform: none; }
                }
                .animate-float {
                    animation: float 3s ease-in-out infinite;
                }
                @keyframes float {
                    0%, 100% { transform: translateY(0); }
                    50% { transform: translateY(-6px); }
                }
                @media (max-width: 1024px) {
                    .reviews-grid {
                        grid-template-columns: repeat(2, minmax(0, 1fr));
                    }
                }
                @media (max-width: 768px) {
                    .reviews-grid,
                    .parents-grid {
                        grid-template-columns: 1fr;
                    }
                    .hero-inner h1 {
                        font-size: 1.875rem;
                    }
                }
                @media (prefers-reduced-motion: reduce) {
                    .animate-flip-in,
                    .animate-wave-in,
                    .animate-float {
                        animation: none;
                    }
                }
                "#}
            </style>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn revealed_cards_accumulate() {
        let cards = Rc::new(RevealedCards::default());
        let cards = cards.reduce(TargetId(2));
        let cards = cards.reduce(TargetId(0));

        assert!(cards.contains(0));
        assert!(!cards.contains(1));
        assert!(cards.contains(2));
        assert_eq!(*cards, RevealedCards([0, 2].into_iter().collect()));
    }

    #[test]
    fn repeated_signal_keeps_the_same_state() {
        let cards = Rc::new(RevealedCards::default()).reduce(TargetId(1));
        let again = cards.clone().reduce(TargetId(1));
        assert!(Rc::ptr_eq(&cards, &again));
    }

    #[test]
    fn page_content_has_every_card() {
        let content = load_content();
        assert_eq!(content.reviews.len(), 9);
        assert_eq!(content.parents.len(), 2);
    }
}
