//! User store: profile, preferences, cart and wishlist.

use serde::{Deserialize, Serialize};

use super::model::{PreferencesUpdate, ProfileUpdate, UserPreferences, UserProfile};
use crate::id::EntityId;
use crate::record::{Fields, Record};
use crate::store::{Domain, Store};

/// Full user domain state. Every field is persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserState {
    pub profile: UserProfile,
    pub preferences: UserPreferences,
    pub cart: Vec<Record>,
    pub wishlist: Vec<Record>,
}

/// Persisted layout of the `user-store` record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedUser {
    pub profile: UserProfile,
    pub preferences: UserPreferences,
    pub cart: Vec<Record>,
    pub wishlist: Vec<Record>,
}

#[derive(Debug, Clone)]
pub enum UserAction {
    UpdateProfile(ProfileUpdate),
    UpdatePreferences(PreferencesUpdate),
    AddToCart(Record),
    RemoveFromCart(EntityId),
    AddToWishlist(Record),
    RemoveFromWishlist(EntityId),
    ClearCart,
    ClearWishlist,
}

pub struct UserDomain;

impl Domain for UserDomain {
    type State = UserState;
    type Action = UserAction;
    type Persisted = PersistedUser;

    const NAME: &'static str = "user-store";

    fn reduce(state: &UserState, action: UserAction) -> UserState {
        let mut next = state.clone();
        match action {
            UserAction::UpdateProfile(update) => next.profile = update.apply(&state.profile),
            UserAction::UpdatePreferences(update) => {
                next.preferences = update.apply(&state.preferences)
            }
            UserAction::AddToCart(item) => next.cart.push(item),
            UserAction::RemoveFromCart(id) => next.cart.retain(|item| item.id != id),
            UserAction::AddToWishlist(item) => next.wishlist.push(item),
            UserAction::RemoveFromWishlist(id) => next.wishlist.retain(|item| item.id != id),
            UserAction::ClearCart => next.cart.clear(),
            UserAction::ClearWishlist => next.wishlist.clear(),
        }
        next
    }

    fn partialize(state: &UserState) -> PersistedUser {
        PersistedUser {
            profile: state.profile.clone(),
            preferences: state.preferences.clone(),
            cart: state.cart.clone(),
            wishlist: state.wishlist.clone(),
        }
    }

    fn restore(persisted: PersistedUser) -> UserState {
        UserState {
            profile: persisted.profile,
            preferences: persisted.preferences,
            cart: persisted.cart,
            wishlist: persisted.wishlist,
        }
    }

    fn max_id(state: &UserState) -> Option<EntityId> {
        state.cart.iter().chain(&state.wishlist).map(|item| item.id).max()
    }
}

pub type UserStore = Store<UserDomain>;

impl Store<UserDomain> {
    pub fn update_profile(&self, update: ProfileUpdate) {
        self.dispatch(UserAction::UpdateProfile(update));
    }

    pub fn update_preferences(&self, update: PreferencesUpdate) {
        self.dispatch(UserAction::UpdatePreferences(update));
    }

    /// Appends a snapshot of `product` to the cart and returns its new id.
    pub fn add_to_cart(&self, product: Fields) -> EntityId {
        let item = Record::new(self.next_id(), product);
        let id = item.id;
        self.dispatch(UserAction::AddToCart(item));
        id
    }

    /// Removes the cart entry with `id`; unknown ids are ignored.
    pub fn remove_from_cart(&self, id: EntityId) {
        self.dispatch(UserAction::RemoveFromCart(id));
    }

    pub fn add_to_wishlist(&self, product: Fields) -> EntityId {
        let item = Record::new(self.next_id(), product);
        let id = item.id;
        self.dispatch(UserAction::AddToWishlist(item));
        id
    }

    pub fn remove_from_wishlist(&self, id: EntityId) {
        self.dispatch(UserAction::RemoveFromWishlist(id));
    }

    pub fn clear_cart(&self) {
        self.dispatch(UserAction::ClearCart);
    }

    pub fn clear_wishlist(&self) {
        self.dispatch(UserAction::ClearWishlist);
    }

    /// Sum of the numeric `price` fields in the cart.
    pub fn cart_total(&self) -> f64 {
        self.select(|state| {
            state
                .cart
                .iter()
                .filter_map(|item| item.get_f64("price"))
                .sum()
        })
    }
}
