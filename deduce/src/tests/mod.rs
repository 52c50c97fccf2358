


mod propagation;
